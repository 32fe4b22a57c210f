// Data models for frames, pose landmarks, exercises, input and workout sessions

pub mod capture;
pub mod exercise;
pub mod input;
pub mod pose;
pub mod session;
