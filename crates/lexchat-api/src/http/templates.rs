//! Server-side page templates.
//!
//! Templates are compiled into the binary. Names ending in `.html` are
//! auto-escaped by minijinja, so turn text is always rendered as text.

use minijinja::Environment;

pub const INDEX: &str = "index.html";

/// Environment holding every page template.
pub fn page_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX, include_str!("../../templates/index.html"))?;
    Ok(env)
}
