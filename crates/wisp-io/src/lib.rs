//! # wisp-io
//!
//! Scene files and their validation.
//!
//! A scene is a JSON document describing one or more hairs and the frame
//! loop settings. External tools (CLI, viewer, asset pipeline) use it to
//! set up a [`StrandGroup`](wisp_solver::StrandGroup).

pub mod scene;
pub mod validator;

pub use scene::{HairDescriptor, Scene};
pub use validator::validate_scene;
