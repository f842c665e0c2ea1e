use colored::Colorize;

pub fn handle() {
    let registry = cirrus_aws::resources::registry();
    println!("Resource types ({}):", registry.len());
    for name in registry.resource_types() {
        println!("  - {}", name.cyan());
    }
}
