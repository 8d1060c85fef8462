pub mod validation;

pub use validation::{
    validate_email, validate_new_ticket, validate_status, validate_ticket_patch, validate_title,
    validate_user, validate_user_name, validate_user_patch,
};
