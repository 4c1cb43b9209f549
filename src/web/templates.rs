//! HTML page templates.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Names end in `.html`, so minijinja auto-escapes every interpolation.

use crate::web::urls;
use minijinja::{Environment, Error, ErrorKind, Value};

/// Page templates shipped with the binary, keyed by name.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("notes/home.html", include_str!("templates/notes/home.html")),
    ("notes/list.html", include_str!("templates/notes/list.html")),
    ("notes/form.html", include_str!("templates/notes/form.html")),
    ("notes/success.html", include_str!("templates/notes/success.html")),
    ("notes/detail.html", include_str!("templates/notes/detail.html")),
    ("notes/delete.html", include_str!("templates/notes/delete.html")),
    ("news/home.html", include_str!("templates/news/home.html")),
    ("news/detail.html", include_str!("templates/news/detail.html")),
    ("news/edit.html", include_str!("templates/news/edit.html")),
    ("news/delete.html", include_str!("templates/news/delete.html")),
    ("users/login.html", include_str!("templates/users/login.html")),
    ("users/logout.html", include_str!("templates/users/logout.html")),
    ("users/signup.html", include_str!("templates/users/signup.html")),
];

/// `{{ url("notes:edit", note.slug) }}` in templates.
///
/// Paths are built from validated slugs and numeric ids, so the result is
/// marked safe and links come out unescaped.
fn url(name: &str, arg: Option<Value>) -> Result<Value, Error> {
    let arg = arg.map(|v| v.to_string());
    urls::reverse(name, arg.as_deref())
        .map(Value::from_safe_string)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("cannot reverse route {name:?} with argument {arg:?}"),
            )
        })
}

/// The compiled template set.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compiles every bundled template.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found.
    pub fn load() -> Result<Self, Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_function("url", url);
        Ok(Self { env })
    }

    /// Renders `name` with the given context.
    pub fn render(&self, name: &str, ctx: Value) -> Result<String, Error> {
        self.env.get_template(name)?.render(ctx)
    }
}
