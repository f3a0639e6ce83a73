pub mod antenatal_visits;
pub mod auth;
pub mod doctor_patients;
pub mod kick_counts;
pub mod lab_results;
pub mod medical_histories;
pub mod pregnancies;
pub mod previous_pregnancies;
pub mod profile;
pub mod vaccinations;
