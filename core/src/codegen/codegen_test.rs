use super::*;
use crate::test_utils::init_test_logging;
use gunion_types::{Basic, Field, Struct, Type, TypeParam};
use indoc::indoc;
use pretty_assertions::assert_eq;

const PKG: &str = "example.com/fixtures/basic";

fn record(name: &str, fields: Vec<Field>) -> Named {
    Named::new(name, PKG).with_underlying(Type::Struct(Struct::new(fields)))
}

fn my_union() -> Named {
    record(
        "myUnion",
        vec![
            Field::new("a", Type::Basic(Basic::Int)),
            Field::new("b", Type::Basic(Basic::String)),
        ],
    )
}

fn config() -> OutputConfig {
    OutputConfig::new("MyUnionUnion", "basic_gunion.go", "basic")
}

fn generate_ok(named: &Named, config: &OutputConfig) -> String {
    init_test_logging();
    match generate(named, config) {
        Ok(source) => source,
        Err(err) => panic!("generation failed: {err}"),
    }
}

fn synthesis_error(named: &Named, config: &OutputConfig) -> SynthesisError {
    match generate(named, config) {
        Err(crate::Error::Synthesis(err)) => err,
        other => panic!("expected a synthesis error, got {other:?}"),
    }
}

#[test]
fn test_invalid_state_is_the_zero_value() {
    let source = generate_ok(&my_union(), &config());
    assert_eq!(
        source,
        indoc! {"
        // Code generated by gunion. DO NOT EDIT.

        package basic

        // MyUnionUnionVariant identifies the active variant of a MyUnionUnion.
        type MyUnionUnionVariant int

        const (
        \tMyUnionUnion_Invalid MyUnionUnionVariant = iota
        \tMyUnionUnion_a
        \tMyUnionUnion_b
        )

        // String returns the name of the variant.
        func (v MyUnionUnionVariant) String() string {
        \tswitch v {
        \tcase MyUnionUnion_a:
        \t\treturn \"a\"
        \tcase MyUnionUnion_b:
        \t\treturn \"b\"
        \tdefault:
        \t\treturn \"Invalid\"
        \t}
        }

        // MyUnionUnion holds exactly one of the fields of myUnion.
        type MyUnionUnion struct {
        \t_variant MyUnionUnionVariant
        \ta        int
        \tb        string
        }

        // Variant returns the active variant.
        func (u *MyUnionUnion) Variant() MyUnionUnionVariant {
        \treturn u._variant
        }

        // Get_a returns the value of a and whether it is the active variant.
        func (u *MyUnionUnion) Get_a() (int, bool) {
        \tif u._variant != MyUnionUnion_a {
        \t\tvar zero int
        \t\treturn zero, false
        \t}
        \treturn u.a, true
        }

        // Get_b returns the value of b and whether it is the active variant.
        func (u *MyUnionUnion) Get_b() (string, bool) {
        \tif u._variant != MyUnionUnion_b {
        \t\tvar zero string
        \t\treturn zero, false
        \t}
        \treturn u.b, true
        }

        // Set_a makes a the active variant, holding value.
        func (u *MyUnionUnion) Set_a(value int) {
        \t*u = MyUnionUnion{_variant: MyUnionUnion_a, a: value}
        }

        // Set_b makes b the active variant, holding value.
        func (u *MyUnionUnion) Set_b(value string) {
        \t*u = MyUnionUnion{_variant: MyUnionUnion_b, b: value}
        }

        // Match calls the handler of the active variant with its value.
        func (u *MyUnionUnion) Match(
        \ta func(int),
        \tb func(string),
        \tinvalid func(),
        ) {
        \tswitch u._variant {
        \tcase MyUnionUnion_a:
        \t\ta(u.a)
        \tcase MyUnionUnion_b:
        \t\tb(u.b)
        \tdefault:
        \t\tinvalid()
        \t}
        }

        // NewMyUnionUnion_a returns a MyUnionUnion holding a.
        func NewMyUnionUnion_a(value int) MyUnionUnion {
        \treturn MyUnionUnion{_variant: MyUnionUnion_a, a: value}
        }

        // NewMyUnionUnion_b returns a MyUnionUnion holding b.
        func NewMyUnionUnion_b(value string) MyUnionUnion {
        \treturn MyUnionUnion{_variant: MyUnionUnion_b, b: value}
        }
        "}
    );
}

#[test]
fn test_first_variant_is_the_zero_value() {
    let config = config().with_features(Features::default() | Features::DEFAULT);
    let source = generate_ok(&my_union(), &config);

    assert!(source.contains(indoc! {"
        const (
        \tMyUnionUnion_a MyUnionUnionVariant = iota
        \tMyUnionUnion_b
        )
    "}));
    assert!(source.contains(indoc! {"
        func (u *MyUnionUnion) Match(
        \ta func(int),
        \tb func(string),
        ) {
        \tswitch u._variant {
        \tcase MyUnionUnion_a:
        \t\ta(u.a)
        \tcase MyUnionUnion_b:
        \t\tb(u.b)
        \t}
        }
    "}));
    assert!(!source.contains("MyUnionUnion_Invalid"));
    assert!(!source.contains("invalid()"));
}

#[test]
fn test_header_records_the_command() {
    let config = config().with_command("gunion -t myUnion\n--no-getters");
    let source = generate_ok(&my_union(), &config);
    assert!(source.starts_with(
        "// Code generated by gunion via `gunion -t myUnion --no-getters`. DO NOT EDIT.\n\npackage basic\n"
    ));
}

#[test]
fn test_disabled_features_are_omitted() {
    let config = config().with_features(Features::empty());
    let source = generate_ok(&my_union(), &config);
    assert!(!source.contains("Get_"));
    assert!(!source.contains("Set_"));
    assert!(!source.contains("Match"));
    assert!(!source.contains("Value"));
    assert!(source.contains("func (u *MyUnionUnion) Variant() MyUnionUnionVariant {"));
    assert!(source.contains("func NewMyUnionUnion_b(value string) MyUnionUnion {"));
}

#[test]
fn test_compact_storage() {
    let config = config().with_features(Features::default() | Features::PUBLIC_VALUE);
    let source = generate_ok(&my_union(), &config);

    assert!(source.contains(indoc! {"
        type MyUnionUnion struct {
        \t_variant MyUnionUnionVariant
        \t_inner   any
        }
    "}));
    assert!(source.contains(indoc! {"
        func (u *MyUnionUnion) Value() any {
        \treturn u._inner
        }
    "}));
    assert!(source.contains(concat!(
        "\tif u._variant != MyUnionUnion_b {\n",
        "\t\tvar zero string\n",
        "\t\treturn zero, false\n",
        "\t}\n",
        "\tvalue, _ := u._inner.(string)\n",
        "\treturn value, true\n",
    )));
    assert!(source.contains("\t*u = MyUnionUnion{_variant: MyUnionUnion_a, _inner: value}\n"));
    assert!(source.contains(concat!(
        "\tcase MyUnionUnion_a:\n",
        "\t\tvalue, _ := u._inner.(int)\n",
        "\t\ta(value)\n",
    )));
}

#[test]
fn test_compact_default_value_reports_the_first_variant() {
    let config = config().with_features(Features::PUBLIC_VALUE | Features::DEFAULT);
    let source = generate_ok(&my_union(), &config);
    assert!(source.contains(indoc! {"
        func (u *MyUnionUnion) Value() any {
        \tif u._variant == MyUnionUnion_a && u._inner == nil {
        \t\tvar zero int
        \t\treturn zero
        \t}
        \treturn u._inner
        }
    "}));
}

#[test]
fn test_generic_union_keeps_type_params() {
    let reader = Type::Named(Named::new("Reader", "io"));
    let named = Named::new("pair", PKG)
        .with_type_params(vec![
            TypeParam::new("K", Type::Named(Named::universe("comparable"))),
            TypeParam::new("V", Type::Named(Named::universe("any"))),
        ])
        .with_underlying(Type::Struct(Struct::new(vec![
            Field::new("keys", Type::slice(Type::Named(Named::new("K", PKG)))),
            Field::new(
                "values",
                Type::map(Type::Named(Named::new("K", PKG)), Type::Named(Named::new("V", PKG))),
            ),
            Field::new("source", reader),
        ])));
    let config = OutputConfig::new("Pair", "pair_gunion.go", "basic");
    let source = generate_ok(&named, &config);

    assert!(source.contains("\npackage basic\n\nimport \"io\"\n\n"));
    assert!(source.contains(indoc! {"
        type Pair[K comparable, V any] struct {
        \t_variant PairVariant
        \tkeys     []K
        \tvalues   map[K]V
        \tsource   io.Reader
        }
    "}));
    assert!(source.contains("func (u *Pair[K, V]) Get_values() (map[K]V, bool) {"));
    assert!(source.contains("\t*u = Pair[K, V]{_variant: Pair_keys, keys: value}\n"));
    assert!(source.contains(indoc! {"
        func NewPair_source[K comparable, V any](value io.Reader) Pair[K, V] {
        \treturn Pair[K, V]{_variant: Pair_source, source: value}
        }
    "}));
}

#[test]
fn test_colliding_imports_get_aliases() {
    let named = record(
        "clash",
        vec![
            Field::new("x", Type::Named(Named::new("Template", "html/template"))),
            Field::new("y", Type::Named(Named::new("Template", "text/template"))),
            Field::new("z", Type::Named(Named::new("Client", "example.com/go-api/v2"))),
        ],
    );
    let config = OutputConfig::new("Clash", "clash_gunion.go", "basic");
    let source = generate_ok(&named, &config);

    assert!(source.contains(indoc! {"
        import (
        \tapi \"example.com/go-api/v2\"
        \t\"html/template\"
        \ttemplate2 \"text/template\"
        )
    "}));
    assert!(source.contains("\tx        template.Template\n"));
    assert!(source.contains("\ty        template2.Template\n"));
    assert!(source.contains("\tz        api.Client\n"));
}

#[test]
fn test_destination_package_types_are_bare() {
    let named = record(
        "refs",
        vec![
            Field::new("local", Type::pointer(Type::Named(Named::new("node", PKG)))),
            Field::new("err", Type::Named(Named::universe("error"))),
        ],
    );
    let source = generate_ok(&named, &OutputConfig::new("Refs", "refs_gunion.go", "basic"));
    assert!(!source.contains("import"));
    assert!(source.contains("\tlocal    *node\n"));
    assert!(source.contains("\terr      error\n"));
}

#[test]
fn test_unsafe_pointer_imports_unsafe() {
    let named = record("raw", vec![Field::new("p", Type::Basic(Basic::UnsafePointer))]);
    let source = generate_ok(&named, &OutputConfig::new("Raw", "raw_gunion.go", "basic"));
    assert!(source.contains("import \"unsafe\"\n"));
    assert!(source.contains("func (u *Raw) Get_p() (unsafe.Pointer, bool) {"));
}

#[test]
fn test_generated_names_avoid_variants() {
    let named = record(
        "tricky",
        vec![
            Field::new("_variant", Type::Basic(Basic::Int)),
            Field::new("_inner", Type::Basic(Basic::Int)),
            Field::new("Invalid", Type::Basic(Basic::Bool)),
            Field::new("u", Type::Basic(Basic::String)),
        ],
    );
    let source = generate_ok(&named, &OutputConfig::new("Tricky", "tricky_gunion.go", "basic"));

    assert!(source.contains(indoc! {"
        const (
        \tTricky__Invalid TrickyVariant = iota
        \tTricky__variant
        \tTricky__inner
        \tTricky_Invalid
        \tTricky_u
        )
    "}));
    assert!(source.contains(indoc! {"
        type Tricky struct {
        \t__variant TrickyVariant
        \t_variant  int
        \t_inner    int
        \tInvalid   bool
        \tu         string
        }
    "}));
    assert!(source.contains("func (_u *Tricky) Get_u() (string, bool) {"));
    assert!(source.contains("\tinvalid func(),\n"));
}

#[test]
fn test_handlers_avoid_type_names() {
    let named = record(
        "shadow",
        vec![
            Field::new("int", Type::Basic(Basic::Int)),
            Field::new("other", Type::Basic(Basic::String)),
        ],
    );
    let source = generate_ok(&named, &OutputConfig::new("Shadow", "shadow_gunion.go", "basic"));
    assert!(source.contains("\t_int func(int),\n"));
    assert!(source.contains("\t\t_int(u.int)\n"));
}

#[test]
fn test_unexported_foreign_type_is_rejected() {
    let named = record(
        "leak",
        vec![
            Field::new("ok", Type::Basic(Basic::Int)),
            Field::new("hidden", Type::Named(Named::new("state", "example.com/other"))),
        ],
    );
    let err = synthesis_error(&named, &config());
    assert_eq!(
        err,
        SynthesisError::Unexported {
            owner: "variant `hidden`".to_string(),
            ty: "example.com/other.state".to_string(),
            package: PKG.to_string(),
        }
    );
}

#[test]
fn test_unexported_type_is_fine_in_its_own_package() {
    let named = record(
        "local",
        vec![Field::new("s", Type::Named(Named::new("state", PKG)))],
    );
    assert!(generate(&named, &config()).is_ok());

    let moved = OutputConfig {
        out_pkg_path: Some("example.com/elsewhere".to_string()),
        ..config()
    };
    assert!(matches!(
        generate(&named, &moved),
        Err(crate::Error::Synthesis(SynthesisError::Unexported { .. }))
    ));
}

#[test]
fn test_blank_variant_is_rejected() {
    let named = record(
        "blank",
        vec![
            Field::new("a", Type::Basic(Basic::Int)),
            Field::new("_", Type::Basic(Basic::Int)),
        ],
    );
    assert_eq!(
        synthesis_error(&named, &config()),
        SynthesisError::BlankVariant {
            union: "blank".to_string(),
            index: 1
        }
    );
}

#[test]
fn test_default_needs_a_variant() {
    let empty = record("empty", Vec::new());
    let config = config().with_features(Features::DEFAULT);
    assert_eq!(
        synthesis_error(&empty, &config),
        SynthesisError::NoVariants {
            union: "empty".to_string()
        }
    );
}

#[test]
fn test_empty_union_without_default() {
    let empty = record("empty", Vec::new());
    let source = generate_ok(&empty, &OutputConfig::new("Empty", "empty_gunion.go", "basic"));
    assert!(source.contains(indoc! {"
        const (
        \tEmpty_Invalid EmptyVariant = iota
        )
    "}));
    assert!(source.contains(indoc! {"
        func (u *Empty) Match(
        \tinvalid func(),
        ) {
        \tswitch u._variant {
        \tdefault:
        \t\tinvalid()
        \t}
        }
    "}));
}

#[test]
fn test_invalid_output_names_are_rejected() {
    let bad_type = OutputConfig::new("my-union", "x.go", "basic");
    assert!(matches!(
        synthesis_error(&my_union(), &bad_type),
        SynthesisError::InvalidName { what: "type name", .. }
    ));
    let bad_pkg = OutputConfig::new("MyUnion", "x.go", "func");
    assert!(matches!(
        synthesis_error(&my_union(), &bad_pkg),
        SynthesisError::InvalidName { what: "package name", .. }
    ));
}

#[test]
fn test_not_a_struct() {
    let named = Named::new("ids", PKG).with_underlying(Type::slice(Type::Basic(Basic::Int)));
    assert!(matches!(
        generate(&named, &config()),
        Err(crate::Error::NotARecord(_))
    ));
}

#[test]
fn test_output_is_deterministic() {
    let named = record(
        "many",
        vec![
            Field::new("w", Type::Named(Named::new("Writer", "io"))),
            Field::new("t", Type::Named(Named::new("Time", "time"))),
            Field::new("c", Type::Named(Named::new("Context", "context"))),
        ],
    );
    let config = OutputConfig::new("Many", "many_gunion.go", "basic");
    let first = generate_ok(&named, &config);
    for _ in 0..5 {
        assert_eq!(generate_ok(&named, &config), first);
    }
    assert!(first.contains("import (\n\t\"context\"\n\t\"io\"\n\t\"time\"\n)\n"));
}
