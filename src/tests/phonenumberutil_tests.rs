use protobuf::Message;

use crate::{
    NumberLengthType, PhoneNumberType, PhoneNumberUtil,
    errors::{MetadataError, ValidationError},
    phonenumber::PhoneNumber,
};

use super::{get_phone_util, region_code::RegionCode};

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::kz()));
    assert!(!regions.contains(&RegionCode::un001()));
}

#[test]
fn get_country_codes_for_calling_code() {
    let phone_util = get_phone_util();
    assert_eq!(
        vec![RegionCode::us(), RegionCode::ca(), RegionCode::bs()],
        phone_util.get_country_codes_for_calling_code(1)
    );
    assert_eq!(vec![RegionCode::ru(), RegionCode::kz()], phone_util.get_country_codes_for_calling_code(7));
    assert_eq!(vec![RegionCode::gb()], phone_util.get_country_codes_for_calling_code(44));
    // Non-geographic entities are not countries.
    assert!(phone_util.get_country_codes_for_calling_code(800).is_empty());

    const INVALID_COUNTRY_CODE: i32 = 2;
    assert!(phone_util.get_country_codes_for_calling_code(INVALID_COUNTRY_CODE).is_empty());
    assert!(!phone_util.has_calling_code(INVALID_COUNTRY_CODE));
}

#[test]
fn calling_code_lookups() {
    let phone_util = get_phone_util();
    assert!(phone_util.has_calling_code(800));
    assert!(phone_util.is_non_geographic_calling_code(800));
    assert!(!phone_util.is_non_geographic_calling_code(44));
    assert_eq!(Some(44), phone_util.get_calling_code_for_country(RegionCode::gb()));
    assert_eq!(None, phone_util.get_calling_code_for_country("XX"));
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_country_code(800));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_country_code(2));
    assert!(phone_util.has_country(RegionCode::br()));
    assert!(!phone_util.has_country(RegionCode::un001()));
}

#[test]
fn get_instance_load_us_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_region(RegionCode::us()).unwrap();
    assert_eq!(RegionCode::us(), metadata.id());
    assert_eq!(1, metadata.country_code());
    assert_eq!("011", metadata.international_prefix());
    assert_eq!("1", metadata.national_prefix());
    assert_eq!(2, metadata.number_format.len());
    assert_eq!("(\\d{3})(\\d{3})(\\d{4})", metadata.number_format[1].pattern());
    assert_eq!("($1) $2-$3", metadata.number_format[1].format());
    assert_eq!("[2-9]\\d{9}", metadata.general_desc.national_number_pattern());
    assert_eq!("900[2-9]\\d{6}", metadata.premium_rate.national_number_pattern());
}

#[test]
fn formatting_rules_are_expanded() {
    let phone_util = get_phone_util();
    let ru = phone_util.get_metadata_for_region(RegionCode::ru()).unwrap();
    assert_eq!("8 ($1)", ru.number_format[0].national_prefix_formatting_rule());
    let gb = phone_util.get_metadata_for_region(RegionCode::gb()).unwrap();
    assert_eq!("0$1", gb.number_format[0].national_prefix_formatting_rule());
    let au = phone_util.get_metadata_for_region(RegionCode::au()).unwrap();
    assert_eq!("(0$1)", au.number_format[0].national_prefix_formatting_rule());
}

#[test]
fn get_instance_load_non_geo_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_non_geographical_entity(800).unwrap();
    assert_eq!(RegionCode::un001(), metadata.id());
    assert_eq!(800, metadata.country_code());
    assert!(phone_util.get_metadata_for_non_geographical_entity(44).is_none());
}

#[test]
fn select_numbering_plan() {
    let phone_util = get_phone_util();

    let plan = phone_util.select_numbering_plan(Some(RegionCode::ca()), None).unwrap();
    assert_eq!(RegionCode::ca(), plan.id());
    assert!(plan.is_nanpa());
    // Canada has no formats of its own.
    assert_eq!(2, plan.formats().len());

    let plan = phone_util.select_numbering_plan(Some(RegionCode::ca()), Some(44)).unwrap();
    assert_eq!(RegionCode::gb(), plan.id());

    let plan = phone_util.select_numbering_plan(None, Some(7)).unwrap();
    assert_eq!(RegionCode::ru(), plan.id());
    assert_eq!(Some("8"), plan.national_prefix_for_parsing());

    let plan = phone_util.select_numbering_plan(None, Some(800)).unwrap();
    assert!(plan.is_non_geographic());
    assert_eq!(800, plan.calling_code());

    assert!(phone_util.select_numbering_plan(None, None).is_none());
    assert!(phone_util.select_numbering_plan(Some("XX"), None).is_none());
    assert!(phone_util.select_numbering_plan(None, Some(2)).is_none());
}

#[test]
fn numbering_plan_international_formats() {
    let phone_util = get_phone_util();
    let br = phone_util.select_numbering_plan(Some(RegionCode::br()), None).unwrap();
    let formats = br.formats();
    assert_eq!(None, br.international_format(&formats[0]));
    assert_eq!(Some("$1 $2-$3"), br.international_format(&formats[1]));
    assert_eq!(Some("$2"), br.national_prefix_transform_rule());

    let us = phone_util.select_numbering_plan(Some(RegionCode::us()), None).unwrap();
    let formats = us.formats();
    // Only formats listed among the international ones may be used.
    assert_eq!(None, us.international_format(&formats[0]));
    assert_eq!(Some("$1-$2-$3"), us.international_format(&formats[1]));

    let gb = phone_util.select_numbering_plan(Some(RegionCode::gb()), None).unwrap();
    assert_eq!(Some("$1 $2 $3"), gb.international_format(&gb.formats()[0]));
    assert_eq!(Some("00"), gb.international_prefix());
    assert_eq!(None, gb.national_prefix_transform_rule());
}

#[test]
fn get_national_significant_number() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("6502530000", national_significant_number);

    number.clear();
    number.set_country_code(39);
    number.set_national_number(312345678);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("312345678", national_significant_number);

    number.clear();
    number.set_country_code(39);
    number.set_national_number(236618300);
    number.set_italian_leading_zero(true);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("0236618300", national_significant_number);

    number.clear();
    number.set_country_code(800);
    number.set_national_number(12345678);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("12345678", national_significant_number);
}

#[test]
fn get_national_significant_number_many_leading_zeros() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(650);
    number.set_italian_leading_zero(true);
    number.set_number_of_leading_zeros(2);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("00650", national_significant_number);

    number.set_number_of_leading_zeros(-3);
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&number);
    assert_eq!("650", national_significant_number);
}

#[test]
fn get_number_type() {
    let phone_util = get_phone_util();

    assert_eq!(PhoneNumberType::PremiumRate, phone_util.get_number_type("9002345678", RegionCode::us(), 1));
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type("8002345678", RegionCode::us(), 1));
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type("12345678", RegionCode::un001(), 800));
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type("7400123456", RegionCode::gb(), 44));
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type("9161234567", RegionCode::ru(), 7));
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type("2423591234", RegionCode::bs(), 1));
    assert_eq!(PhoneNumberType::FixedLine, phone_util.get_number_type("2079460018", RegionCode::gb(), 44));
    assert_eq!(PhoneNumberType::FixedLine, phone_util.get_number_type("2423456789", RegionCode::bs(), 1));
    assert_eq!(PhoneNumberType::FixedLineOrMobile, phone_util.get_number_type("2015550123", RegionCode::us(), 1));
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type("2045551234", RegionCode::us(), 1));
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type("65025300001", RegionCode::us(), 1));
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type("2015550123", "XX", 1));
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();

    number.set_country_code(1);
    number.set_national_number(2015550123);
    assert!(phone_util.is_valid_number(&number).unwrap());
    assert!(phone_util.is_valid_number_for_region(&number, RegionCode::us()));

    number.clear();
    number.set_country_code(1);
    number.set_national_number(2045551234);
    assert!(phone_util.is_valid_number(&number).unwrap());
    assert_eq!(RegionCode::ca(), phone_util.get_region_code_for_number(&number).unwrap());
    assert!(!phone_util.is_valid_number_for_region(&number, RegionCode::us()));

    number.clear();
    number.set_country_code(1);
    number.set_national_number(2423591234);
    assert_eq!(RegionCode::bs(), phone_util.get_region_code_for_number(&number).unwrap());
    assert!(phone_util.is_valid_number(&number).unwrap());

    number.clear();
    number.set_country_code(39);
    number.set_national_number(212345678);
    number.set_italian_leading_zero(true);
    assert!(phone_util.is_valid_number(&number).unwrap());

    number.clear();
    number.set_country_code(800);
    number.set_national_number(12345678);
    assert!(phone_util.is_valid_number(&number).unwrap());
    assert!(phone_util.is_valid_number_for_region(&number, RegionCode::un001()));
}

#[test]
fn is_not_valid_number() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();

    number.set_country_code(1);
    number.set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&number).unwrap());

    number.clear();
    number.set_country_code(44);
    number.set_national_number(791234567);
    assert!(!phone_util.is_valid_number(&number).unwrap());

    number.clear();
    number.set_country_code(7);
    number.set_national_number(5161234567);
    assert!(!phone_util.is_valid_number(&number).unwrap());

    number.clear();
    number.set_country_code(2);
    number.set_national_number(2366183000);
    assert!(!phone_util.is_valid_number(&number).unwrap());
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&number).unwrap());
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();

    number.set_country_code(1);
    number.set_national_number(2015550123);
    assert_eq!(Ok(NumberLengthType::IsPossible), phone_util.is_possible_number_with_reason(&number));
    assert!(phone_util.is_possible_number(&number));

    number.set_national_number(5550123);
    assert_eq!(Ok(NumberLengthType::IsPossibleLocalOnly), phone_util.is_possible_number_with_reason(&number));
    assert!(phone_util.is_possible_number(&number));

    number.set_national_number(123);
    assert_eq!(Err(ValidationError::TooShort), phone_util.is_possible_number_with_reason(&number));

    number.set_national_number(20155501234);
    assert_eq!(Err(ValidationError::TooLong), phone_util.is_possible_number_with_reason(&number));

    number.set_country_code(55);
    number.set_national_number(11912345678);
    assert_eq!(Ok(NumberLengthType::IsPossible), phone_util.is_possible_number_with_reason(&number));

    number.set_country_code(2);
    assert_eq!(Err(ValidationError::InvalidCountryCode), phone_util.is_possible_number_with_reason(&number));
    assert!(!phone_util.is_possible_number(&number));
}

#[test]
fn rejects_broken_metadata() {
    assert!(matches!(
        PhoneNumberUtil::from_text_metadata("metadata { id: "),
        Err(MetadataError::InvalidTextFormat(_))
    ));
    assert!(matches!(
        PhoneNumberUtil::from_text_metadata(r#"metadata { id: "US" general_desc { national_number_pattern: "\\d{10}" } }"#),
        Err(MetadataError::MissingCountryCode(region)) if region == "US"
    ));
    assert!(matches!(
        PhoneNumberUtil::from_text_metadata(
            r#"metadata { id: "US" country_code: 1 }
               metadata { id: "US" country_code: 1 }"#
        ),
        Err(MetadataError::DuplicateRegion(region)) if region == "US"
    ));
    assert!(matches!(
        PhoneNumberUtil::from_text_metadata(
            r#"metadata { id: "US" country_code: 1 general_desc { national_number_pattern: "(\\d" } }"#
        ),
        Err(MetadataError::InvalidRegex(_))
    ));
}
