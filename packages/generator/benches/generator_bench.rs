use criterion::{black_box, criterion_group, criterion_main, Criterion};
use propforge_generator::{CollectedOutput, Generator, GeneratorOptions};
use propforge_syntax::{
    parse_type, Attribute, CompilationUnit, FieldDecl, InMemoryModel, TypeDecl, TypeKind,
};

fn view_model(namespace: &str, name: &str, base: Option<&str>, fields: usize) -> TypeDecl {
    let mut decl = TypeDecl::new(Some(namespace), name, TypeKind::Class);
    decl.modifiers = vec!["public".to_string(), "partial".to_string()];
    decl.base_list = base.map(|b| vec![b.to_string()]).unwrap_or_default();
    for i in 0..fields {
        decl.fields.push(FieldDecl {
            name: Some(format!("_value{}", i)),
            type_name: Some("Dictionary<string, List<(int, Item?)>>".to_string()),
            attributes: vec![Attribute::new(
                "MakeProperty",
                [format!("\"Value{}\"", i), "true".to_string(), "true".to_string()],
            )],
            doc: Some(format!("/// <summary>\n/// Value {}\n/// </summary>", i)),
            ..Default::default()
        });
    }
    decl
}

fn units(types: usize, fields: usize) -> Vec<CompilationUnit> {
    let mut decls = vec![TypeDecl::new(Some("App.Models"), "Item", TypeKind::Class)];
    let mut base: Option<String> = None;
    for i in 0..types {
        let name = format!("ViewModel{}", i);
        decls.push(view_model("App", &name, base.as_deref(), fields));
        base = Some(name);
    }
    vec![CompilationUnit {
        path: None,
        usings: vec!["System.Collections.Generic".to_string(), "App.Models".to_string()],
        types: decls,
    }]
}

fn parse_nested_type(c: &mut Criterion) {
    c.bench_function("parse_nested_type", |b| {
        b.iter(|| parse_type(black_box("Dictionary<string, List<(int first, Item? second)>>[]")))
    });
}

fn generate_small_batch(c: &mut Criterion) {
    let units = units(1, 3);
    let model = InMemoryModel::from_units(&units);
    let generator = Generator::new(&model, GeneratorOptions::default());

    c.bench_function("generate_small_batch", |b| {
        b.iter(|| {
            let mut output = CollectedOutput::new();
            generator.generate_observable(black_box(&units), &mut output)
        })
    });
}

fn generate_inheritance_chain(c: &mut Criterion) {
    let units = units(50, 10);
    let model = InMemoryModel::from_units(&units);
    let generator = Generator::new(&model, GeneratorOptions::default());

    c.bench_function("generate_inheritance_chain", |b| {
        b.iter(|| {
            let mut output = CollectedOutput::new();
            generator.generate_observable(black_box(&units), &mut output)
        })
    });
}

criterion_group!(
    benches,
    parse_nested_type,
    generate_small_batch,
    generate_inheritance_chain
);
criterion_main!(benches);
