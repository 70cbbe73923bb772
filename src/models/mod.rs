pub mod editorial;
pub mod solution;

pub use editorial::{Approach, EditorialContent};
pub use solution::{Author, LanguageInfo, SelectedSolution};
