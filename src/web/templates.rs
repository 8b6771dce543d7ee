use minijinja::{Environment, Value};
use rust_embed::RustEmbed;
use tracing::error;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// Loads every embedded template into a fresh environment.
pub fn init_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();

    for name in TemplateAssets::iter() {
        if let Some(file) = TemplateAssets::get(&name) {
            let source = String::from_utf8_lossy(&file.data).into_owned();
            env.add_template_owned(name.into_owned(), source)?;
        }
    }

    Ok(env)
}

pub fn render_template(env: &Environment, template_name: &str, context: Value) -> String {
    match env.get_template(template_name) {
        Ok(tmpl) => match tmpl.render(context) {
            Ok(result) => result,
            Err(e) => {
                error!("Template render error: {}", e);
                format!("<h1>Template Error</h1><p>{}</p>", e)
            }
        },
        Err(e) => {
            error!("Template not found: {} ({})", template_name, e);
            format!("<h1>Template Not Found</h1><p>{}: {}</p>", template_name, e)
        }
    }
}
