//! Template loading.

use std::path::Path;

use ktreesitter_codegen::{CodegenError, TemplateKind, Templates};

/// Load templates from `dir`, or use the built-in set when `dir` is `None`.
///
/// An override directory must provide every template.
pub fn load_templates(dir: Option<&Path>) -> Result<Templates, CodegenError> {
    let Some(dir) = dir else {
        return Ok(Templates::builtin());
    };

    let templates = Templates::load(|kind| {
        let path = dir.join(kind.resource_name());
        std::fs::read_to_string(&path).map_err(|e| CodegenError::ResourceMissing {
            name: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    for kind in TemplateKind::ALL {
        let unknown = templates.unknown_placeholders(kind);
        if !unknown.is_empty() {
            tracing::warn!(
                template = kind.resource_name(),
                placeholders = ?unknown,
                "template uses placeholders that will not be substituted"
            );
        }
    }

    Ok(templates)
}
