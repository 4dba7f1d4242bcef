use std::path::{Path, PathBuf};

use super::*;
use crate::test_utils::init_test_logging;
use gunion_types::ChanDir;
use indoc::indoc;
use pretty_assertions::assert_eq;

const PKG: &str = "example.com/p";

fn package(src: &str) -> Package {
    Package::from_sources(
        Path::new("p"),
        PKG,
        vec![(PathBuf::from("p.go"), src.to_string())],
    )
    .unwrap()
}

fn root(src: &str, name: &str) -> Named {
    init_test_logging();
    let package = package(src);
    match Translator::new(&package).translate_root(name) {
        Ok(named) => named,
        Err(err) => panic!("translation failed: {err}"),
    }
}

fn root_err(src: &str, name: &str) -> LoadError {
    let package = package(src);
    match Translator::new(&package).translate_root(name) {
        Ok(named) => panic!("expected an error, got {named:?}"),
        Err(err) => err,
    }
}

fn fields(named: &Named) -> Vec<(String, Type)> {
    named
        .underlying_struct()
        .expect("struct")
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.ty.clone()))
        .collect()
}

fn local(name: &str) -> Named {
    Named::new(name, PKG)
}

fn basic(basic: Basic) -> Type {
    Type::Basic(basic)
}

#[test]
fn test_basic_struct() {
    let named = root(
        indoc! {r#"
            package p

            type myUnion struct {
                a int
                b string `json:"b"`
            }
        "#},
        "myUnion",
    );
    assert_eq!(named.name, "myUnion");
    assert_eq!(named.package, PKG);
    assert!(named.type_params.is_empty());
    let s = named.underlying_struct().unwrap();
    assert_eq!(
        s.fields,
        vec![
            Field::new("a", basic(Basic::Int)),
            Field::new("b", basic(Basic::String)).with_tag(r#"json:"b""#),
        ]
    );
}

#[test]
fn test_basic_spellings_and_universe_names() {
    let named = root(
        indoc! {r#"
            package p

            import "unsafe"

            type s struct {
                r  rune
                i3 int32
                b  byte
                u8 uint8
                a  any
                e  error
                p  unsafe.Pointer
            }
        "#},
        "s",
    );
    assert_eq!(
        fields(&named),
        vec![
            ("r".to_string(), basic(Basic::Rune)),
            ("i3".to_string(), basic(Basic::Int32)),
            ("b".to_string(), basic(Basic::Byte)),
            ("u8".to_string(), basic(Basic::Uint8)),
            ("a".to_string(), Type::Named(Named::universe("any"))),
            ("e".to_string(), Type::Named(Named::universe("error"))),
            ("p".to_string(), basic(Basic::UnsafePointer)),
        ]
    );
}

#[test]
fn test_composites() {
    let named = root(
        indoc! {r#"
            package p

            import ctxalias "context"

            const (
                Zero = iota
                One
                Two
            )

            type s struct {
                ptr  **int
                arr  [Two]string
                sl   []map[string]ctxalias.Context
                ch   <-chan error
                fn   func(format string, args ...any) (int, error)
                anon struct{ x int }
                it   interface{ String() string }
            }
        "#},
        "s",
    );
    let context = Type::Named(Named::new("Context", "context"));
    let expected_fn = Signature::new(
        vec![
            Var::new("format", basic(Basic::String)),
            Var::new("args", Type::slice(Type::Named(Named::universe("any")))),
        ],
        vec![
            Var::unnamed(basic(Basic::Int)),
            Var::unnamed(Type::Named(Named::universe("error"))),
        ],
    )
    .variadic();
    assert_eq!(
        fields(&named),
        vec![
            (
                "ptr".to_string(),
                Type::pointer(Type::pointer(basic(Basic::Int)))
            ),
            ("arr".to_string(), Type::array(2, basic(Basic::String))),
            (
                "sl".to_string(),
                Type::slice(Type::map(basic(Basic::String), context))
            ),
            (
                "ch".to_string(),
                Type::chan(ChanDir::RecvOnly, Type::Named(Named::universe("error")))
            ),
            ("fn".to_string(), Type::Signature(expected_fn)),
            (
                "anon".to_string(),
                Type::Struct(Struct::new(vec![Field::new("x", basic(Basic::Int))]))
            ),
            (
                "it".to_string(),
                Type::Interface(Interface {
                    embeds: vec![],
                    methods: vec![Func {
                        name: "String".to_string(),
                        signature: Signature::new(vec![], vec![Var::unnamed(basic(Basic::String))]),
                    }],
                })
            ),
        ]
    );
}

#[test]
fn test_generics() {
    let named = root(
        indoc! {r#"
            package p

            import "io"

            type Generic[T any] struct {
                v T
            }

            type s[T any, U comparable, V io.Writer] struct {
                t  T
                g  Generic[int]
                gg Generic[Generic[U]]
            }
        "#},
        "s",
    );

    let any = Type::Named(Named::universe("any"));
    let generic = |arg: Type| {
        Type::Named(
            local("Generic")
                .with_type_params(vec![TypeParam::new("T", any.clone())])
                .with_type_args(vec![arg]),
        )
    };

    assert_eq!(
        named.type_params,
        vec![
            TypeParam::new("T", any.clone()),
            TypeParam::new("U", Type::Named(Named::universe("comparable"))),
            TypeParam::new("V", Type::Named(Named::new("Writer", "io"))),
        ]
    );
    assert_eq!(
        fields(&named),
        vec![
            ("t".to_string(), Type::Named(local("T"))),
            ("g".to_string(), generic(basic(Basic::Int))),
            (
                "gg".to_string(),
                generic(generic(Type::Named(local("U"))))
            ),
        ]
    );
}

#[test]
fn test_constraints_referring_back_are_shallow() {
    let named = root(
        indoc! {r#"
            package p

            type Comparer[T any] interface {
                Compare(other T) int
            }

            type Node[T Comparer[T]] struct {
                v T
            }

            type Item struct{}

            type s struct {
                n Node[Item]
            }
        "#},
        "s",
    );
    let comparer_of_t = Type::Named(local("Comparer").with_type_args(vec![Type::Named(local("T"))]));
    let expected = local("Node")
        .with_type_params(vec![TypeParam::new("T", comparer_of_t)])
        .with_type_args(vec![Type::Named(local("Item"))]);
    assert_eq!(fields(&named), vec![("n".to_string(), Type::Named(expected))]);
}

#[test]
fn test_self_reference_is_finite() {
    let named = root(
        indoc! {r#"
            package p

            type node struct {
                next     *node
                children []node
                byName   map[string]*node
            }
        "#},
        "node",
    );
    let node = Type::Named(local("node"));
    assert_eq!(
        fields(&named),
        vec![
            ("next".to_string(), Type::pointer(node.clone())),
            ("children".to_string(), Type::slice(node.clone())),
            (
                "byName".to_string(),
                Type::map(basic(Basic::String), Type::pointer(node))
            ),
        ]
    );
}

#[test]
fn test_mutual_recursion_is_finite() {
    let named = root(
        indoc! {r#"
            package p

            type A[T B[T]] struct {
                b *B[T]
            }

            type B[T A[T]] interface{}

            type s struct {
                a A[int]
            }
        "#},
        "s",
    );
    let fields = fields(&named);
    let Type::Named(a) = &fields[0].1 else {
        panic!("expected a named field");
    };
    assert_eq!(a.name, "A");
    assert_eq!(
        a.type_params,
        vec![TypeParam::new(
            "T",
            Type::Named(local("B").with_type_args(vec![Type::Named(local("T"))]))
        )]
    );
}

#[test]
fn test_alias_and_definition_chains_reach_the_struct() {
    let src = indoc! {r#"
        package p

        type target struct {
            a int
        }

        type alias = target

        type defined alias
    "#};
    let expected = fields(&root(src, "target"));
    assert_eq!(fields(&root(src, "alias")), expected);
    assert_eq!(fields(&root(src, "defined")), expected);
    assert_eq!(root(src, "defined").name, "defined");
}

#[test]
fn test_translation_is_idempotent() {
    let src = indoc! {r#"
        package p

        type Generic[T any] struct{ v T }

        type s struct {
            a Generic[string]
            b []*s
        }
    "#};
    assert_eq!(root(src, "s"), root(src, "s"));
}

#[test]
fn test_non_struct_root_translates() {
    let named = root("package p\ntype s []int\n", "s");
    assert_eq!(named.underlying.as_deref(), Some(&Type::slice(basic(Basic::Int))));
    assert!(named.underlying_struct().is_none());
}

#[test]
fn test_unsupported_array_length_names_the_field() {
    let err = root_err(
        indoc! {r#"
            package p

            const N = 1 << 2

            type s struct {
                ok  int
                bad [N]int
            }
        "#},
        "s",
    );
    match err {
        LoadError::Unsupported {
            construct,
            field: Some(field),
            location,
        } => {
            assert!(construct.contains("array length `N`"), "{construct}");
            assert_eq!((field.index, field.name.as_str()), (1, "bad"));
            assert_eq!(location.line, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_implicit_array_length_is_unsupported() {
    let err = root_err("package p\ntype s struct {\n\ta [...]int\n}\n", "s");
    assert!(
        matches!(err, LoadError::Unsupported { field: Some(FieldRef { index: 0, .. }), .. }),
        "{err}"
    );
}

#[test]
fn test_type_param_instantiation_is_unsupported() {
    let err = root_err("package p\ntype s[T any] struct {\n\ta T[int]\n}\n", "s");
    assert!(matches!(err, LoadError::Unsupported { .. }), "{err}");
}

#[test]
fn test_dot_import_is_unsupported() {
    let err = root_err(
        "package p\nimport . \"strings\"\ntype s struct {\n\tb Builder\n}\n",
        "s",
    );
    assert!(matches!(err, LoadError::Unsupported { .. }), "{err}");
}

#[test]
fn test_foreign_underlying_is_unsupported() {
    let err = root_err("package p\nimport \"time\"\ntype s time.Time\n", "s");
    assert!(matches!(err, LoadError::Unsupported { field: None, .. }), "{err}");
}

#[test]
fn test_load_failures() {
    let err = root_err("package p\ntype s struct {\n\ta missing\n}\n", "s");
    assert!(
        matches!(&err, LoadError::Undefined { name, .. } if name == "missing"),
        "{err}"
    );

    let err = root_err(
        "package p\ntype G[T any] struct{}\ntype s struct {\n\ta G\n}\n",
        "s",
    );
    assert!(matches!(err, LoadError::TypeArgCount { .. }), "{err}");

    let err = root_err(
        "package p\ntype G[T any] struct{}\ntype s struct {\n\ta G[int, string]\n}\n",
        "s",
    );
    assert!(matches!(err, LoadError::TypeArgCount { .. }), "{err}");

    let err = root_err("package p\ntype s struct {\n\ta fmt.Stringer\n}\n", "s");
    assert!(
        matches!(&err, LoadError::Undefined { name, .. } if name == "fmt"),
        "{err}"
    );

    let err = root_err("package p\ntype s struct{}\n", "missing");
    assert!(matches!(err, LoadError::NotFound { .. }), "{err}");
}

#[test]
fn test_underlying_cycle_is_rejected() {
    let err = root_err("package p\ntype a b\ntype b a\n", "a");
    assert!(matches!(err, LoadError::Unsupported { .. }), "{err}");
}
