use criterion::{Criterion, black_box, criterion_group, criterion_main};

use asyoutype::{AsYouType, AsYouTypeOptions};

use phonenumber::{
    self as rlp,
    country::Id::{self, AU, GB, IT, RU, US}, Mode,
};

type TestEntity = (&'static str, &'static str, Id);

fn setup_numbers() -> Vec<TestEntity> {
    vec![
        ("(201) 555-0123", "US", US),
        ("+44 20 7946 0018", "US", US),
        ("011 44 20 7946 0018", "US", US),
        ("0011 44 20 7946 0018", "AU", AU),
        ("020 7946 0018", "GB", GB),
        ("8 (916) 123-45-67", "RU", RU),
        ("02 1234 5678", "IT", IT),
    ]
}

/// Feeds the number to a fresh session one character at a time.
fn type_number<'a>(formatter: &'a mut AsYouType<'static>, number: &str) -> &'a mut AsYouType<'static> {
    formatter.reset();
    let mut buf = [0; 4];
    for char in number.chars() {
        formatter.input(char.encode_utf8(&mut buf));
    }
    formatter
}

fn input_benchmark(c: &mut Criterion) {
    let numbers = setup_numbers();
    let mut formatters: Vec<_> = numbers
        .iter()
        .map(|(_, country, _)| AsYouType::new(AsYouTypeOptions::from(*country)))
        .collect();

    for ((number, _, id), formatter) in numbers.iter().zip(formatters.iter_mut()) {
        let rlp_number = rlp::parse(Some(*id), number).unwrap();
        assert_eq!(
            Some(rlp::format(&rlp_number).mode(Mode::E164).to_string()),
            type_number(formatter, number).get_number_value()
        );
    }

    let mut group = c.benchmark_group("Input Comparison");

    group.bench_function("asyoutype: input char by char", |b| {
        b.iter(|| {
            for ((number, _, _), formatter) in numbers.iter().zip(formatters.iter_mut()) {
                black_box(type_number(formatter, black_box(number)).get_number_value());
            }
        })
    });

    group.bench_function("asyoutype: input at once", |b| {
        b.iter(|| {
            for ((number, _, _), formatter) in numbers.iter().zip(formatters.iter_mut()) {
                formatter.reset();
                black_box(formatter.input(black_box(number)));
            }
        })
    });

    group.bench_function("rust-phonenumber: parse and format(E164)", |b| {
        b.iter(|| {
            for (number, _, id) in &numbers {
                let rlp_number = rlp::parse(Some(*id), black_box(number)).unwrap();
                black_box(rlp::format(&rlp_number).mode(Mode::E164).to_string());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, input_benchmark);
criterion_main!(benches);
