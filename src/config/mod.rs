//! Configuration module for transdoc.
//!
//! Handles loading and saving application settings.

mod settings;

pub use settings::{
    DocumentSettings, GeneralSettings, SegmentationSettings, Settings, YoutubeSettings,
};
