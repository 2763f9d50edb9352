//! Package clause rewriting.

/// Rename the package declared by the first line starting with `package`.
///
/// The line is split on whitespace, its second field replaced by
/// `package_name`, and the fields rejoined with single spaces; if there is no second field the name is appended. Later
/// package lines are left alone. Every output line ends with `\n`.
pub fn change_package(source: &str, package_name: &str) -> String {
    let mut output = String::with_capacity(source.len() + package_name.len());
    let mut done = false;

    for line in source.lines() {
        if !done && line.starts_with("package") {
            let mut parts: Vec<&str> = line.split_whitespace().collect();
            match parts.get_mut(1) {
                Some(name) => *name = package_name,
                None => parts.push(package_name),
            }
            output.push_str(&parts.join(" "));
            done = true;
        } else {
            output.push_str(line);
        }
        output.push('\n');
    }

    output
}
