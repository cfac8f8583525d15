mod lead;

pub use lead::{LeadInOut, LeadPoints};
