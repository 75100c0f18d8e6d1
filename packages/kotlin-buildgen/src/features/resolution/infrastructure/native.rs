//! Standard library namespaces
//!
//! Imports from these packages are satisfied by the Kotlin or Java runtime
//! and never need a dependency.

/// Host platform predicate: true for packages of the JDK
pub type StdlibPredicate = fn(&str) -> bool;

const KOTLIN_PREFIXES: &[&str] = &["kotlin.", "kotlinx."];

/// Package roots shipped with the JDK
const JAVA_STDLIB_PACKAGES: &[&str] = &[
    "java",
    "jdk",
    "sun",
    "com.sun",
    "javax.accessibility",
    "javax.annotation.processing",
    "javax.crypto",
    "javax.imageio",
    "javax.lang.model",
    "javax.management",
    "javax.naming",
    "javax.net",
    "javax.print",
    "javax.rmi",
    "javax.script",
    "javax.security",
    "javax.sound",
    "javax.sql",
    "javax.swing",
    "javax.tools",
    "javax.transaction.xa",
    "javax.xml",
    "org.ietf.jgss",
    "org.omg",
    "org.w3c.dom",
    "org.xml.sax",
];

/// Reports if the import literal is a native Kotlin or Java import
pub fn is_native_import(imp: &str, is_host_stdlib: StdlibPredicate) -> bool {
    KOTLIN_PREFIXES.iter().any(|prefix| imp.starts_with(prefix)) || is_host_stdlib(imp)
}

/// JDK packages. `java.*` is always part of the JDK; `javax.*` only for the
/// packages the JDK itself ships.
pub fn is_java_stdlib(imp: &str) -> bool {
    JAVA_STDLIB_PACKAGES
        .iter()
        .any(|pkg| has_package_prefix(imp, pkg))
}

/// `imp` is `pkg` or lies below it
fn has_package_prefix(imp: &str, pkg: &str) -> bool {
    match imp.strip_prefix(pkg) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
