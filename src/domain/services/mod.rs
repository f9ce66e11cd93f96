pub mod intervals;
pub mod matcher;
pub mod period;
pub mod sections;
pub mod skills_matrix;
pub mod tokens;

pub use skills_matrix::build_skills_table;
