//! Planning pipeline stages and their orchestration.
//!
//! Each stage is a plain function over owned or borrowed data so it can be
//! tested in isolation; [`planner::SchedulePlanner`] wires them to the model.

pub mod calendar_aligner;
pub mod extractor;
pub mod horizon;
pub mod normalizer;
pub mod planner;
pub mod tip_correlator;

pub use calendar_aligner::{align, AlignedDay};
pub use extractor::{extract_payload, parse_payload, PayloadShape};
pub use horizon::{apply_window, cutoff_date, HorizonWindow};
pub use normalizer::normalize;
pub use planner::SchedulePlanner;
pub use tip_correlator::{
    correlate, parse_tips, select_topics, KeywordClassifier, StudyClassifier, StudyTopics,
};
