//! Error taxonomy for page rendering.

use thiserror::Error;

/// Result alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A page could not be rendered. Every variant names the offending page id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The entity variant has no page template.
    #[error("no page template for {kind} `{entity}`")]
    TemplateSelection { entity: String, kind: &'static str },

    /// The formatter could not render a type, name or reference.
    #[error("cannot render {field} of `{entity}`: {source}")]
    FormatterResolution {
        entity: String,
        field: String,
        #[source]
        source: FormatError,
    },

    /// The API model violates a structural invariant.
    #[error("malformed API model at `{entity}`: {detail}")]
    StructuralInvariant { entity: String, detail: String },
}

impl RenderError {
    /// Attach page context to a formatter failure.
    ///
    /// Hierarchy cycles are model defects rather than formatter gaps, so they
    /// surface as [`RenderError::StructuralInvariant`].
    pub fn from_format(entity: &str, field: impl Into<String>, err: FormatError) -> Self {
        match err {
            FormatError::HierarchyCycle(ref name) => RenderError::StructuralInvariant {
                entity: entity.to_string(),
                detail: format!("inheritance cycle through `{}`", name),
            },
            other => RenderError::FormatterResolution {
                entity: entity.to_string(),
                field: field.into(),
                source: other,
            },
        }
    }

    /// Page id of the entity that failed.
    pub fn entity(&self) -> &str {
        match self {
            RenderError::TemplateSelection { entity, .. }
            | RenderError::FormatterResolution { entity, .. }
            | RenderError::StructuralInvariant { entity, .. } => entity,
        }
    }
}

/// Failure reported by a [`Formatter`](crate::format::Formatter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unresolved type `{0}`")]
    UnresolvedType(String),

    #[error("unresolved reference `{0}`")]
    UnresolvedReference(String),

    #[error("inheritance cycle through `{0}`")]
    HierarchyCycle(String),
}

/// The API model snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("namespace has no name")]
    MissingName,
}
