// Adapters at the edges of a session: where frames and keys come from, which
// pose backend reads them, and where the overlay is shown

pub mod capture;
pub mod display;
pub mod input;
pub mod pose;
