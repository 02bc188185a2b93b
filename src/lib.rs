#![warn(clippy::all, rust_2018_idioms)]

pub mod annotation;
pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod event;
pub mod extraction;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod tool;
pub mod view;
pub mod viewer;

pub use annotation::{
    Annotation, AnnotationBody, AnnotationId, AnnotationKind, AnnotationSet, Gesture,
};
pub use app::AnnotatorApp;
pub use command::{Command, History};
pub use config::EngineConfig;
pub use document::{Document, DocumentId, DocumentSource};
pub use engine::{Engine, ViewerSnapshot};
pub use error::{ConfigError, DocumentLoadError, ExtractionError};
pub use event::{EngineEvent, EventHandler};
pub use extraction::{AiContext, ContentSource, ContextStatus};
pub use input::{Dispatch, FocusContext, InputEvent, KeyPress};
pub use tool::{CursorMode, ShapeVariant, ToolKind, ToolProperties, ToolPropertiesPatch, ToolState};
pub use view::{ViewState, ZoomLimits};
