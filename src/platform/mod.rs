// External collaborators: frame capture and hand landmark estimation

pub mod capture;
pub mod landmarks;
