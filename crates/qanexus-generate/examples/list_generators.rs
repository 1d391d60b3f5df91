use qanexus_generate::GeneratorRegistry;

fn main() {
    let registry = GeneratorRegistry::new();
    for generator in registry.iter() {
        let params: Vec<String> = generator
            .params()
            .iter()
            .map(|spec| {
                let marker = if spec.required { "" } else { "?" };
                format!("{}{marker}: {}", spec.key, spec.kind.name())
            })
            .collect();
        println!(
            "{:<32} {} [{}]",
            generator.id(),
            generator.description(),
            params.join(", ")
        );
    }
}
