mod interfaces;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod generated;
mod phonenumberutil;
mod asyoutype;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;

#[cfg(test)]
mod tests;

pub use proto_gen::{phonemetadata, phonenumber};
pub use phonenumber::PhoneNumber;
pub use phonenumberutil::{
    PHONE_NUMBER_UTIL, PhoneNumberType, NumberLengthType,
    errors::{self, MetadataError, ValidationError},
    numbering_plan::NumberingPlan,
    phonenumberutil::PhoneNumberUtil,
};
pub use asyoutype::{AsYouType, AsYouTypeOptions};
