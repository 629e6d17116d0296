pub mod candidate_service;
pub mod delivery_service;
pub mod invitation_service;
pub mod pipeline;
pub mod scheduling_service;
