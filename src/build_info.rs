/// Build features that change what a run measures.
pub fn features() -> Vec<&'static str> {
    let mut result = Vec::new();
    if cfg!(feature = "profile-with-puffin") {
        result.push("profile-with-puffin");
    }
    if cfg!(debug_assertions) {
        result.push("debug_assertions");
    }
    result
}

/// Print a JSON object identifying the binary `name` and the build.
pub fn print_report(name: &str) {
    let features: Vec<String> =
        features().iter().map(|f| format!("\"{}\"", f)).collect();
    println!("{{");
    println!("  \"name\": \"{}\",", name);
    println!("  \"version\": \"{}\",", env!("CARGO_PKG_VERSION"));
    println!("  \"features\": [{}],", features.join(", "));
    println!("  \"git_describe\": \"{}\",", env!("GIT_DESCRIBE"));
    println!("  \"git_hash\": \"{}\"", env!("GIT_HASH"));
    println!("}}");
}
