pub(crate) mod helper_constants;
mod helper_functions;
pub mod errors;
pub mod enums;
pub mod numbering_plan;
pub mod phonenumberutil;
pub(crate) mod phone_number_regexps_and_mappings;

use std::sync::LazyLock;

pub use enums::{NumberLengthType, PhoneNumberType};
use crate::phonenumberutil::phonenumberutil::PhoneNumberUtil;

/// The numbering-plan database compiled into the library.
pub static PHONE_NUMBER_UTIL: LazyLock<PhoneNumberUtil> = LazyLock::new(|| {
    match PhoneNumberUtil::new() {
        Ok(util) => util,
        Err(err) => {
            let err_message = format!("Could not parse compiled-in metadata: {:?}", err);
            log::error!("{}", err_message);
            panic!("{}", err_message);
        }
    }
});
