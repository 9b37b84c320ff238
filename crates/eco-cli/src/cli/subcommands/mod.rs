mod establishment;
mod inspection;
mod question;
mod report;
mod result;

pub use establishment::EstablishmentCommands;
pub use inspection::InspectionCommands;
pub use question::QuestionCommands;
pub use report::ReportCommands;
pub use result::ResultCommands;
