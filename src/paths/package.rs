/// Split a package specifier into the package name and the sub-path inside the package.
///
/// Scoped packages (`@scope/name/...`) split at the second `/`, everything else at the first
/// one. The returned sub-path keeps its leading `/`; it is empty when the specifier names the
/// whole package.
pub fn split_package_name_and_file_path(package_name: &str) -> (&str, &str) {
  let Some(first) = package_name.find('/') else {
    return (package_name, "");
  };
  if first == 0 {
    return (package_name, "");
  }

  let split_at = if package_name.starts_with('@') {
    match package_name[first + 1..].find('/') {
      Some(offset) => first + 1 + offset,
      None => return (package_name, ""),
    }
  } else {
    first
  };

  package_name.split_at(split_at)
}
