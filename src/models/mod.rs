pub mod antenatal_visit;
pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod fetal_kick_count;
pub mod husband;
pub mod lab_result;
pub mod medical_history;
pub mod pregnancy;
pub mod pregnant_woman;
pub mod previous_pregnancy;
pub mod vaccination;

pub use antenatal_visit::*;
pub use appointment::*;
pub use doctor::*;
pub use fetal_kick_count::*;
pub use husband::*;
pub use lab_result::*;
pub use medical_history::*;
pub use pregnancy::*;
pub use pregnant_woman::*;
pub use previous_pregnancy::*;
pub use vaccination::*;
