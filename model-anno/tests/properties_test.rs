use model_anno::{Element, Label, Length, Name, OptionList, RangeInt};

#[test]
fn test_fixed_length() {
    let len = Length { max: 0, min: 0, fixed: 5 };
    assert!(len.verify(5));
    assert!(!len.verify(4));
    assert!(!len.verify(6));
}

#[test]
fn test_default_length() {
    let len = Length::default();
    assert!(len.verify(0));
    assert!(len.verify(255));
    assert!(!len.verify(256));
}

#[test]
fn test_range_int_bounds() {
    let range = RangeInt { min: 1, max: 10 };
    assert!(range.verify(1));
    assert!(range.verify(10));
    assert!(!range.verify(0));
    assert!(!range.verify(11));
}

#[test]
fn test_keyed_option_list() {
    let list = OptionList { options: &["0:男", "1:女"], bits: false };
    let pairs: Vec<(String, String)> = list.to_map().into_iter().collect();
    assert_eq!(pairs, vec![("0".into(), "男".into()), ("1".into(), "女".into())]);
    assert_eq!(list.display("0"), "男");
    assert_eq!(list.display("9"), "");
}

#[test]
fn test_plain_option_list() {
    let list = OptionList { options: &["男", "女"], bits: false };
    let pairs: Vec<(String, String)> = list.to_map().into_iter().collect();
    assert_eq!(pairs, vec![("男".into(), "男".into()), ("女".into(), "女".into())]);
}

#[test]
fn test_resolution_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let labelled = Element::property("User", "nick").with(Label { value: "V", desc: "" });
    assert_eq!(labelled.user_desc()?, "V");

    let bare = Element::property("User", "nick");
    assert_eq!(bare.user_name()?, "nick");
    assert_eq!(bare.user_label()?, "nick");
    assert_eq!(bare.user_desc()?, "nick");

    let named = Element::class("User").with(Name { value: "users" }).with(Label { value: "", desc: "" });
    assert_eq!(named.user_desc()?, "users");
    Ok(())
}

#[test]
fn test_resolvers_are_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let element = Element::method("Auth", "login").with(Label { value: "Login", desc: "Sign in" });
    assert_eq!(element.user_desc()?, element.user_desc()?);
    assert_eq!(element.user_label()?, element.user_label()?);

    let list = OptionList { options: &["a:1", "b:2"], bits: false };
    assert_eq!(list.to_map(), list.to_map());
    assert_eq!(list.verify(["1"]), list.verify(["1"]));
    Ok(())
}
