use asyoutype::{AsYouType, AsYouTypeOptions, PHONE_NUMBER_UTIL, PhoneNumberType, PhoneNumberUtil};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn types_number_into_formatted_output() {
    init_logger();
    let mut formatter = AsYouType::new(AsYouTypeOptions::from("US"));
    let outputs: Vec<String> = "+12015550123"
        .chars()
        .map(|char| formatter.input(&char.to_string()).to_owned())
        .collect();
    assert_eq!("+", outputs[0]);
    assert_eq!("+1", outputs[1]);
    assert_eq!("+1 201 555 0123", outputs[outputs.len() - 1]);
    assert_eq!(Some("US"), formatter.get_country());
    assert_eq!(Some("1".to_owned()), formatter.get_calling_code());
    assert_eq!("xx xxx xxx xxxx", formatter.get_template());
}

#[test]
fn number_matches_utility_validation() {
    init_logger();
    let mut formatter = AsYouType::new(AsYouTypeOptions::from("GB"));
    formatter.input("020 7946 0018");
    let phone_number = formatter.get_number().expect("Number should be complete");
    assert_eq!(44, phone_number.country_code());
    assert_eq!(2079460018, phone_number.national_number());
    let national_significant_number = PhoneNumberUtil::get_national_significant_number(&phone_number);
    assert_eq!(
        PhoneNumberType::FixedLine,
        PHONE_NUMBER_UTIL.get_number_type(&national_significant_number, "GB", 44)
    );
    assert!(formatter.is_valid());
    assert!(formatter.is_possible());
}

#[test]
fn sessions_are_independent() {
    init_logger();
    let mut us = AsYouType::new(AsYouTypeOptions::from("US"));
    let mut ru = AsYouType::new(AsYouTypeOptions::from("RU"));
    assert_eq!("201-5", us.input("2015"));
    assert_eq!("8 (916) 123-45-67", ru.input("89161234567"));
    assert_eq!("(201) 555-0123", us.input("550123"));
    assert_eq!(Some("RU"), ru.get_country());
}

#[test]
fn reset_allows_reuse() {
    init_logger();
    let mut formatter = AsYouType::new(AsYouTypeOptions::default());
    assert_eq!("+44 20 7946 0018", formatter.input("+442079460018"));
    assert_eq!("", formatter.reset().get_chars());
    assert_eq!("+7 916 123 45 67", formatter.input("+79161234567"));
    assert_eq!(Some("+79161234567".to_owned()), formatter.get_number_value());
}
