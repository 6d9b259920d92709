use model_anno::{
    Element, ElementId, Error, Exclude, Hidden, Label, Length, Model, ModelField, ModelTable, ModelView, Name,
    ParamDirection, Registry, SqlProcedure,
};

#[derive(Model)]
#[anno(table(version = 1), label = "Order")]
struct Order {
    #[anno(field(primary_key, auto_inc = 1))]
    id: i64,
    #[anno(label(value = "Amount", desc = "Order total in cents"))]
    amount: i64,
}

#[derive(Model)]
#[anno(view(version = 3))]
struct OrderStats {
    count: i64,
}

fn auth_elements() -> Vec<Element> {
    vec![
        Element::class("AuthController").with(Name { value: "auth" }),
        Element::method("AuthController", "login").with(Label { value: "Login", desc: "" }),
        Element::parameter(Some("AuthController"), "login", 1, Some("password"))
            .with(Length { max: 64, min: 8, fixed: 0 }),
        Element::parameter(Some("AuthController"), "login", 0, Some("user")).with(Name { value: "username" }),
        Element::method("AuthController", "internal").with(Exclude),
        Element::function("proc_orders").with(SqlProcedure { value: "sp_orders" }),
        Element::parameter(None, "proc_orders", 0, None).with(ParamDirection::InOut),
    ]
}

#[test]
fn test_register_models_and_elements() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = Registry::builder().register::<Order>().register::<OrderStats>().elements(auth_elements()).build()?;
    assert_eq!(registry.len(), 5 + 7);

    let amount = ElementId::Property { owner: "Order", name: "amount" };
    assert_eq!(registry.user_label(&amount)?, "Amount");
    assert_eq!(registry.user_desc(&amount)?, "Order total in cents");
    assert_eq!(registry.user_name(&amount)?, "amount");

    let login = ElementId::Function { owner: Some("AuthController"), name: "login" };
    assert_eq!(registry.user_label(&login)?, "Login");
    assert_eq!(registry.user_desc(&login)?, "Login");
    assert_eq!(registry.user_name(&ElementId::Class("AuthController"))?, "auth");

    let params = registry.parameters_of(Some("AuthController"), "login");
    let names: Vec<_> = params.iter().map(|p| p.user_name()).collect::<Result<_, _>>()?;
    assert_eq!(names, vec!["username", "password"]);

    let password = ElementId::Parameter { owner: Some("AuthController"), function: "login", index: 1 };
    assert!(registry.find::<Length>(&password).is_some_and(|l| !l.verify(4)));

    let functions: Vec<_> = registry.functions_of("AuthController").filter(|f| !f.is_excluded()).collect();
    assert_eq!(functions.len(), 1);

    let unnamed = ElementId::Parameter { owner: None, function: "proc_orders", index: 0 };
    assert_eq!(registry.find::<ParamDirection>(&unnamed), Some(&ParamDirection::InOut));
    assert!(matches!(registry.user_name(&unnamed), Err(Error::InvalidElement(_))));

    println!("Registry registration test passed!");
    Ok(())
}

#[test]
fn test_registry_tables() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builder().register::<Order>().register::<OrderStats>().elements(auth_elements()).build()?;

    let tables = registry.tables()?;
    let names: Vec<_> = tables.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Order", "OrderStats"]);

    let order = registry.table("Order")?.ok_or("missing table")?;
    assert_eq!(order.columns.len(), 2);
    assert!(registry.table("AuthController")?.is_none());
    assert!(matches!(registry.table("Missing"), Err(Error::UnknownElement(_))));

    println!("Registry tables test passed!");
    Ok(())
}

#[test]
fn test_strict_and_lenient_duplicates() -> Result<(), Box<dyn std::error::Error>> {
    let first = Element::property("User", "name").with(Name { value: "first" });
    let second = Element::property("User", "name").with(Name { value: "second" });

    let strict = Registry::builder().element(first.clone()).element(second.clone()).build();
    assert!(matches!(strict, Err(Error::DuplicateElement(_))));

    let lenient = Registry::builder().strict(false).element(first).element(second).build()?;
    assert_eq!(lenient.len(), 1);
    assert_eq!(lenient.user_name(&ElementId::Property { owner: "User", name: "name" })?, "second");

    println!("Duplicate registration test passed!");
    Ok(())
}

#[test]
fn test_build_validates_descriptors() {
    let wrong_target = Registry::builder().element(Element::class("User").with(Hidden)).build();
    assert!(matches!(wrong_target, Err(Error::InvalidTarget { .. })));

    let twice = Registry::builder()
        .element(Element::property("User", "id").with(ModelField::default()).with(ModelField::default()))
        .build();
    assert!(matches!(twice, Err(Error::DuplicateDescriptor { .. })));
}

#[test]
fn test_tables_with_interleaved_fields() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builder()
        .element(Element::property("Invoice", "id").with(ModelField { primary_key: true, ..Default::default() }))
        .element(Element::class("Invoice").with(ModelTable { version: 2 }))
        .element(Element::property("Ledger", "total"))
        .element(Element::property("Invoice", "due"))
        .element(Element::class("Ledger").with(ModelView { version: 1 }))
        .element(Element::property("Ledger", "month"))
        .element(Element::property("Invoice", "paid"))
        .build()?;

    let tables = registry.tables()?;
    let columns: Vec<Vec<_>> = tables.iter().map(|t| t.columns.iter().map(|c| c.name).collect()).collect();
    assert_eq!(tables.iter().map(|t| t.name).collect::<Vec<_>>(), vec!["Invoice", "Ledger"]);
    assert_eq!(columns, vec![vec!["id", "due", "paid"], vec!["total", "month"]]);

    for table in &tables {
        assert_eq!(registry.table(table.name)?.as_ref(), Some(table));
    }

    println!("Interleaved tables test passed!");
    Ok(())
}

#[test]
fn test_build_rejects_empty_identifiers() {
    for element in [
        Element::class(""),
        Element::property("User", ""),
        Element::property("User", "r#"),
        Element::method("User", ""),
        Element::function(""),
    ] {
        let id = element.id().clone();
        let built = Registry::builder().element(element).build();
        assert!(matches!(built, Err(Error::InvalidElement(ref bad)) if *bad == id), "{} accepted", id);
    }

    let unnamed = Registry::builder().element(Element::parameter(None, "sum", 0, None)).build();
    assert!(unnamed.is_ok());
}

#[test]
fn test_unknown_element() {
    let registry = Registry::default();
    assert!(registry.is_empty());
    let err = registry.user_label(&ElementId::Class("Nope")).unwrap_err();
    assert!(matches!(err, Error::UnknownElement(_)));
    assert_eq!(err.to_string(), "element Nope is not registered");
}

#[test]
fn test_json_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builder().register::<Order>().build()?;
    let json = registry.to_json()?;

    let elements = json.as_array().ok_or("expected an array")?;
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0]["id"], "Order");
    assert_eq!(elements[0]["kind"], "Class");
    assert_eq!(elements[0]["descriptors"][0]["kind"], "ModelTable");
    assert_eq!(elements[0]["descriptors"][0]["args"]["version"], 1);
    assert_eq!(elements[1]["id"], "Order.id");
    assert_eq!(elements[1]["descriptors"][0]["args"]["auto_inc"], 1);

    println!("JSON snapshot test passed!");
    Ok(())
}

#[test]
fn test_global_install_once() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builder().register::<Order>().build()?;
    let installed = model_anno::install(registry)?;
    assert_eq!(installed.len(), 3);
    assert!(model_anno::global().is_some());

    let again = model_anno::install(Registry::default());
    assert!(matches!(again, Err(Error::AlreadyInstalled)));
    assert_eq!(model_anno::global().map(Registry::len), Some(3));

    println!("Global registry test passed!");
    Ok(())
}
