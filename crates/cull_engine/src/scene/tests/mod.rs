//! Whole-pipeline tests across scenes, feature combinations and frames
