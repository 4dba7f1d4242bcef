//! Builds a few Go types and prints them with two qualifiers.
//!
//! Run with: cargo run --example basic

use gunion_types::{Basic, Field, FullPath, Named, Qualifier, Struct, Type, TypeFormatter, TypeVisitor};

/// Writes only the last element of each import path.
struct LastElement;

impl Qualifier for LastElement {
    fn qualifier<'a>(&'a self, named: &'a Named) -> Option<&'a str> {
        if named.is_universe() {
            None
        } else {
            named.package.rsplit('/').next()
        }
    }
}

struct BasicCounter {
    count: usize,
}

impl TypeVisitor for BasicCounter {
    fn visit_ty(&mut self, ty: &Type) {
        if matches!(ty, Type::Basic(_)) {
            self.count += 1;
        }
        self.super_visit_ty(ty);
    }
}

fn main() {
    println!("=== gunion types ===\n");

    let reader = Type::Named(Named::new("Reader", "io"));
    let request = Type::pointer(Type::Named(Named::new("Request", "net/http")));
    let record = Type::Struct(Struct::new(vec![
        Field::new("count", Type::Basic(Basic::Int)),
        Field::new("names", Type::slice(Type::Basic(Basic::String))),
        Field::new("body", reader),
        Field::new("req", request),
        Field::new("headers", Type::map(Type::Basic(Basic::String), Type::Basic(Basic::String))),
    ]));

    println!("1. Full paths:");
    println!("   {}", TypeFormatter::format(&record, &FullPath));

    println!("\n2. Last path element:");
    println!("   {}", TypeFormatter::format(&record, &LastElement));

    println!("\n3. Visitor counting basic types:");
    let mut counter = BasicCounter { count: 0 };
    counter.visit_ty(&record);
    println!("   {} basic types", counter.count);
}
