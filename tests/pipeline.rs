use std::sync::Arc;
use sunspot_dashboard::charts::{render, RenderError, BOXPLOT_YEARS, DEFAULT_VALUE_COLUMN};
use sunspot_dashboard::data::{DataLoader, LoadCache, LoaderError, LoaderOptions, DATE_COLUMN};
use sunspot_dashboard::pipeline::{self, DashboardError};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn load_is_idempotent_per_path() {
    let path = fixture("sunspots_small.csv");
    let mut cache = LoadCache::default();

    let first = cache.load(&path).unwrap();
    let second = cache.load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    // A fresh read of the same file produces an equal table
    let fresh = DataLoader::default().load_csv(&path).unwrap();
    assert_eq!(*first, fresh);
}

#[test]
fn invalidate_forces_reread() {
    let path = fixture("sunspots_small.csv");
    let mut cache = LoadCache::default();

    let first = cache.load(&path).unwrap();
    assert!(cache.invalidate(&path));
    assert!(!cache.contains(&path));

    let second = cache.load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn non_integer_year_is_format_error() {
    let err = DataLoader::default()
        .load_csv(&fixture("bad_year.csv"))
        .unwrap_err();
    assert!(err.is_data_format(), "unexpected error: {err}");
    assert!(err.to_string().contains("19x0"));

    let err = DataLoader::default()
        .load_csv(&fixture("fractional_year.csv"))
        .unwrap_err();
    assert!(err.is_data_format(), "unexpected error: {err}");
}

#[test]
fn missing_path_or_column_is_load_error() {
    let mut cache = LoadCache::default();
    let err = cache.load(&fixture("does_not_exist.csv")).unwrap_err();
    assert!(err.is_data_load());

    let err = cache.load(&fixture("missing_column.csv")).unwrap_err();
    assert!(matches!(err, LoaderError::DataLoad { .. }));
    assert!(err.to_string().contains("SUNACTIVITY"));
    assert!(cache.is_empty());

    // A directory exists but is not a CSV file
    let err = cache.load(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")).unwrap_err();
    assert!(matches!(err, LoaderError::DataLoad { .. }));
}

#[test]
fn custom_required_columns() {
    let options = LoaderOptions {
        year_column: "YEAR".to_string(),
        activity_column: "SPOTS".to_string(),
    };
    let table = DataLoader::new(options)
        .load_csv(&fixture("missing_column.csv"))
        .unwrap();
    assert_eq!(table.height(), 2);
    assert_eq!(table.numeric_columns(), vec!["SPOTS".to_string()]);
}

#[test]
fn date_key_is_first_and_round_trips_to_year() {
    let table = DataLoader::default()
        .load_csv(&fixture("sunspots_small.csv"))
        .unwrap();

    assert_eq!(table.column_names()[0], DATE_COLUMN);
    assert_eq!(table.years().len(), 12);

    let keys = table.date_keys().unwrap();
    let rederived: Vec<i32> = keys
        .iter()
        .map(|d| chrono::Datelike::year(&d.unwrap()))
        .collect();
    assert_eq!(rederived, table.years());

    for d in keys.iter().flatten() {
        assert_eq!(chrono::Datelike::ordinal(d), 1);
    }
}

#[test]
fn rows_keep_file_order() {
    let table = DataLoader::default()
        .load_csv(&fixture("unsorted.csv"))
        .unwrap();
    assert_eq!(table.years(), &[1752, 1749, 1751, 1750]);

    let figure = render(&table, None).unwrap();
    let xs: Vec<i32> = figure
        .time_series
        .points
        .iter()
        .map(|(d, _)| chrono::Datelike::year(d))
        .collect();
    assert_eq!(xs, vec![1752, 1749, 1751, 1750]);
}

#[test]
fn numeric_columns_exclude_keys() {
    let table = DataLoader::default()
        .load_csv(&fixture("sunspots_small.csv"))
        .unwrap();
    assert_eq!(
        table.numeric_columns(),
        vec!["SUNACTIVITY".to_string(), "SMOOTHED".to_string()]
    );
}

#[test]
fn trend_recovers_known_line() {
    let table = DataLoader::default()
        .load_csv(&fixture("linear.csv"))
        .unwrap();
    let figure = render(&table, Some(DEFAULT_VALUE_COLUMN)).unwrap();

    let trend = figure.trend.as_ref().unwrap();
    assert!((trend.fit.slope - 2.0).abs() < 1e-6);
    assert!((trend.fit.intercept + 3000.0).abs() < 1e-6);
    assert_eq!(trend.years.len(), 51);
    for (&year, &fitted) in trend.years.iter().zip(trend.fitted.iter()) {
        assert!((fitted - (2.0 * year - 3000.0)).abs() < 1e-6);
    }
}

#[test]
fn all_null_column_starves_panels_b_to_d_only() {
    let table = DataLoader::default()
        .load_csv(&fixture("all_null.csv"))
        .unwrap();
    let figure = render(&table, None).unwrap();

    assert_eq!(figure.time_series.points.len(), 3);
    assert!(figure.time_series.segments().is_empty());

    assert!(figure.distribution.as_ref().unwrap_err().is_insufficient_data());
    assert!(figure.boxplot.as_ref().unwrap_err().is_insufficient_data());
    assert!(figure.trend.as_ref().unwrap_err().is_insufficient_data());
    assert_eq!(figure.starved_panels().len(), 3);
    assert!(!figure.is_complete());
}

#[test]
fn single_year_starves_density_and_trend() {
    let table = DataLoader::default()
        .load_csv(&fixture("single_year.csv"))
        .unwrap();
    let figure = render(&table, None).unwrap();

    assert_eq!(figure.time_series.segments().len(), 1);
    assert!(figure.distribution.is_err());
    assert!(figure.trend.is_err());
    // 1950 is inside the boxplot window
    assert_eq!(figure.boxplot.as_ref().unwrap().summary.median, 83.9);
}

#[test]
fn boxplot_ignores_years_outside_window() {
    let table = DataLoader::default()
        .load_csv(&fixture("boxplot_window.csv"))
        .unwrap();
    let figure = render(&table, None).unwrap();

    let boxplot = figure.boxplot.as_ref().unwrap();
    assert_eq!(boxplot.years, BOXPLOT_YEARS);

    let s = &boxplot.summary;
    assert_eq!(s.count, 11);
    assert_eq!(s.min, 0.0);
    assert_eq!(s.max, 10.0);
    assert!((s.q1 - 2.5).abs() < 1e-12);
    assert!((s.median - 5.0).abs() < 1e-12);
    assert!((s.q3 - 7.5).abs() < 1e-12);
    assert!(s.outliers.is_empty());

    // The extremes still reach the other panels
    let distribution = figure.distribution.as_ref().unwrap();
    assert_eq!(distribution.sample_size, 13);
    assert_eq!(distribution.histogram.edges[0], -5000.0);
}

#[test]
fn distribution_uses_present_values() {
    let table = DataLoader::default()
        .load_csv(&fixture("sunspots_small.csv"))
        .unwrap();
    let figure = render(&table, None).unwrap();

    let distribution = figure.distribution.as_ref().unwrap();
    assert_eq!(distribution.sample_size, 11);
    assert_eq!(distribution.histogram.counts.len(), 30);
    assert_eq!(distribution.histogram.counts.iter().sum::<usize>(), 11);
    assert_eq!(distribution.kde.xs.len(), 200);
    assert_eq!(distribution.kde.xs[0], 9.6);
    assert_eq!(distribution.kde.xs[199], 83.4);

    // One gap at 1758 splits the series in two
    assert_eq!(figure.time_series.segments().len(), 2);
    assert!(figure.trend.is_ok());

    // 1749..=1760 has no rows in the boxplot window
    assert!(figure.boxplot.as_ref().unwrap_err().is_insufficient_data());
    assert_eq!(figure.starved_panels().len(), 1);
    assert!(!figure.is_complete());
}

#[test]
fn missing_markers_read_as_gaps() {
    let table = DataLoader::default()
        .load_csv(&fixture("na_tokens.csv"))
        .unwrap();
    assert_eq!(
        table.numeric_columns(),
        vec!["SUNACTIVITY".to_string(), "SMOOTHED".to_string()]
    );

    let figure = render(&table, None).unwrap();
    let values: Vec<Option<f64>> = figure.time_series.points.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![Some(5.0), None, Some(7.0), Some(8.0)]);
    assert_eq!(figure.time_series.segments().len(), 2);
    assert_eq!(figure.distribution.as_ref().unwrap().sample_size, 3);
    assert!(figure.is_complete());

    let smoothed = render(&table, Some("SMOOTHED")).unwrap();
    assert_eq!(smoothed.trend.as_ref().unwrap().years, vec![1900.0, 1903.0]);
}

#[test]
fn unknown_or_key_column_is_not_found() {
    let table = DataLoader::default()
        .load_csv(&fixture("sunspots_small.csv"))
        .unwrap();

    for column in ["NOPE", DATE_COLUMN, "YEAR"] {
        match render(&table, Some(column)) {
            Err(RenderError::ColumnNotFound(name)) => assert_eq!(name, column),
            other => panic!("expected ColumnNotFound for {column}, got {other:?}"),
        }
    }

    let figure = render(&table, Some("SMOOTHED")).unwrap();
    assert_eq!(figure.column, "SMOOTHED");
}

#[test]
fn pipeline_reports_which_stage_failed() {
    let mut cache = LoadCache::default();

    let err = pipeline::run(&mut cache, &fixture("bad_year.csv"), None).unwrap_err();
    assert!(matches!(err, DashboardError::Load(ref e) if e.is_data_format()));

    let err = pipeline::run(&mut cache, &fixture("sunspots_small.csv"), Some("NOPE")).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Render(RenderError::ColumnNotFound(_))
    ));

    let output = pipeline::run(&mut cache, &fixture("sunspots_small.csv"), None).unwrap();
    assert_eq!(output.table.height(), 12);
    assert_eq!(output.figure.column, "SUNACTIVITY");
    // The failed render above still cached the table
    assert_eq!(cache.len(), 1);
}
