//! Content model types.
//!
//! These types describe *what* goes into a tailored document, never how it
//! looks. Styling comes from the template's style profile at assembly time.

mod block;
mod content;
mod cv;
mod letter;

pub use block::Block;
pub use content::{ContentModel, Section, MAX_HEADING_LEVEL};
pub use cv::{CvData, EarlierExperience, Experience};
pub use letter::{CoverLetter, LETTER_DATE_FORMAT};
