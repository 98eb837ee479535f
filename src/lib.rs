// Reusable library API for the letters, numbers and conundrum rounds
pub mod errors;
pub mod letters;
pub mod line_reader;
pub mod log;
pub mod shapes;
pub mod word_dictionary;

pub use errors::CountdownError;
pub use shapes::{EquationTemplate, ShapeTable, Step};
pub use word_dictionary::{DictionarySource, WordDictionary, WordResult};
