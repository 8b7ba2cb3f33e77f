//! trybuild compile-time tests for inject_macros

#[test]
fn trybuild_injectable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.pass("tests/trybuild/injectable_tuple_ok.rs");
}
