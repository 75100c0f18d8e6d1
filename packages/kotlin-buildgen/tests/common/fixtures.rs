//! Kotlin source fixtures

/// A file declaring `package` with the given imports
pub fn kotlin_source(package: &str, imports: &[&str]) -> String {
    let mut source = String::new();
    if !package.is_empty() {
        source.push_str(&format!("package {package}\n\n"));
    }
    for import in imports {
        source.push_str(&format!("import {import}\n"));
    }
    source.push_str("\nclass Placeholder\n");
    source
}

/// A file with a top-level `main` function
pub fn kotlin_main(package: &str, imports: &[&str]) -> String {
    let mut source = kotlin_source(package, imports);
    source.push_str("\nfun main() {\n    println(\"hello\")\n}\n");
    source
}

/// A `maven_install.json` lock file exporting packages per coordinate
pub fn maven_lock_file(artifacts: &[(&str, &[&str])]) -> String {
    let entries: Vec<String> = artifacts
        .iter()
        .map(|(coordinate, packages)| {
            let packages: Vec<String> = packages.iter().map(|p| format!("\"{p}\"")).collect();
            format!("    \"{coordinate}\": [{}]", packages.join(", "))
        })
        .collect();
    format!(
        "{{\n  \"version\": \"2\",\n  \"packages\": {{\n{}\n  }}\n}}\n",
        entries.join(",\n")
    )
}
