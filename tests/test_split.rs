use chrono::{Duration, NaiveDate};
use gold_forecast::features::{build_dataset, Dataset};
use gold_forecast::series::NormalizedPoint;
use rstest::rstest;

fn dataset_of(n_rows: usize) -> Dataset {
    let start: NaiveDate = "2024-01-01".parse().unwrap();
    // n_rows + 6 points so the feature builder leaves exactly n_rows
    let points: Vec<NormalizedPoint> = (0..n_rows + 6)
        .map(|i| NormalizedPoint {
            date: start + Duration::days(i as i64),
            price: 1800.0 + i as f64,
        })
        .collect();
    build_dataset(&points).unwrap()
}

#[rstest]
#[case(2, 1, 1)]
#[case(5, 4, 1)]
#[case(10, 8, 2)]
#[case(24, 19, 5)]
#[case(99, 79, 20)]
#[case(100, 80, 20)]
#[case(101, 80, 21)]
fn split_sizes_follow_the_floor_rule(
    #[case] n: usize,
    #[case] expected_train: usize,
    #[case] expected_test: usize,
) {
    let dataset = dataset_of(n);
    assert_eq!(dataset.len(), n);

    let split = dataset.split().unwrap();
    assert_eq!(split.train.len(), expected_train);
    assert_eq!(split.test.len(), expected_test);
}

#[rstest]
#[case(2)]
#[case(10)]
#[case(50)]
fn train_always_precedes_test(#[case] n: usize) {
    let split = dataset_of(n).split().unwrap();

    let last_train = split.train.last_row().unwrap().date;
    let first_test = split.test.rows()[0].date;
    assert!(last_train < first_test);
}

#[test]
fn a_single_row_cannot_be_split() {
    assert!(dataset_of(1).split().is_err());
}
