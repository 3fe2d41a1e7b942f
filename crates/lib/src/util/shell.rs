//! Shell-safe rendering of command lines for logs.

use std::path::Path;

/// Characters that never need quoting in a POSIX shell word.
fn is_safe(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-' | '_')
}

/// Quote `word` so a POSIX shell reads it back as one argument.
pub fn quote(word: &str) -> String {
  if word.is_empty() {
    return "''".to_string();
  }
  if word.chars().all(is_safe) {
    return word.to_string();
  }
  format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

/// Render `program args... [< stdin]` as a copy-pasteable shell line.
pub fn callstring(program: &Path, args: &[String], stdin: Option<&Path>) -> String {
  let mut parts = Vec::with_capacity(args.len() + 3);
  parts.push(quote(&program.to_string_lossy()));
  parts.extend(args.iter().map(|arg| quote(arg)));
  if let Some(stdin) = stdin {
    parts.push("<".to_string());
    parts.push(quote(&stdin.to_string_lossy()));
  }
  parts.join(" ")
}
