//! Integration tests for opening datasets by path and by sample name

use std::path::PathBuf;

use quicklook_dataset::{
    write_dataset_file, Dataset, Error, Field, FileLoader, Loader, MemoryDataset, SampleCatalog,
};
use rstest::{fixture, rstest};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quicklook-loading-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[fixture]
fn sample_dir() -> PathBuf {
    let dir = scratch_dir("samples");
    let dataset = MemoryDataset::new("", [-1.0; 3], [1.0; 3], [2, 2, 2])
        .with_length_units("kpc")
        .with_field(
            Field::new("gas", "density"),
            "Msun/kpc**3",
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )
        .unwrap();
    write_dataset_file(&dataset, dir.join("galaxy_box.json")).unwrap();
    dir
}

#[rstest]
#[case("toy_dataset")]
#[case("linear_ramp")]
fn bundled_samples_open_by_name(#[case] name: &str) {
    let loader = FileLoader::default();
    assert!(loader.open(name).unwrap_err().is_unidentified());

    let dataset = loader.open_named_sample(name).unwrap();
    assert_eq!(dataset.name(), name);

    let extrema = dataset
        .select_all()
        .extrema(&[Field::new("gas", "density"), Field::new("gas", "temperature")])
        .unwrap();
    assert_eq!(extrema.len(), 2);
}

#[rstest]
fn sample_dir_files_open_by_name(sample_dir: PathBuf) {
    let loader = FileLoader::new(SampleCatalog::empty().with_sample_dir(&sample_dir));

    let dataset = loader.open_named_sample("galaxy_box").unwrap();
    assert_eq!(dataset.name(), "galaxy_box");
    assert_eq!(dataset.length_units(), "kpc");
    assert_eq!(dataset.domain_left_edge().as_slice(), &[-1.0, -1.0, -1.0]);

    let extrema = dataset
        .select_all()
        .extrema(&[Field::new("gas", "density")])
        .unwrap();
    assert_eq!(extrema[0].values(), [1.0, 8.0]);
    assert_eq!(extrema[0].units, "Msun/kpc**3");
}

#[rstest]
fn sample_dir_files_open_by_path(sample_dir: PathBuf) {
    let path = sample_dir.join("galaxy_box.json");
    let dataset = FileLoader::default().open(path.to_str().unwrap()).unwrap();
    assert_eq!(dataset.name(), "galaxy_box");
}

#[test]
fn dotted_sample_names_keep_their_suffix() {
    let dir = scratch_dir("dotted");
    for (name, value) in [("run", 1.0), ("run.002", 2.0)] {
        let dataset = MemoryDataset::new("", [0.0; 3], [1.0; 3], [1, 1, 1])
            .with_constant_field(Field::new("gas", "density"), "g/cm**3", value);
        write_dataset_file(&dataset, dir.join(format!("{name}.json"))).unwrap();
    }
    let loader = FileLoader::new(SampleCatalog::empty().with_sample_dir(&dir));

    let dataset = loader.open_named_sample("run.002").unwrap();
    let extrema = dataset
        .select_all()
        .extrema(&[Field::new("gas", "density")])
        .unwrap();
    assert_eq!(extrema[0].values(), [2.0, 2.0]);

    // no run.001.json, so this must not fall through to run.json
    assert!(matches!(
        loader.open_named_sample("run.001"),
        Err(Error::DatasetNotIdentified(name)) if name == "run.001"
    ));
}

#[rstest]
fn unknown_sample_name(sample_dir: PathBuf) {
    let loader = FileLoader::new(SampleCatalog::default().with_sample_dir(sample_dir));
    let error = loader.open_named_sample("not_a_sample").unwrap_err();
    assert!(matches!(error, Error::DatasetNotIdentified(_)));
    assert!(!error.is_unidentified());
}

#[test]
fn grid_over_native_mesh() {
    // density increases by 1 with each cell along z
    let values: Vec<f64> = (0..8).map(|i| (i % 2) as f64).collect();
    let dataset = MemoryDataset::new("layers", [0.0; 3], [1.0; 3], [2, 2, 2])
        .with_field(Field::new("gas", "density"), "g/cm**3", values)
        .unwrap();

    let grid = dataset
        .uniform_grid(
            dataset.domain_left_edge(),
            dataset.domain_right_edge(),
            [2, 2, 4],
        )
        .unwrap();
    assert_eq!(grid.dimensions(), [2, 2, 4]);

    let density = grid.field(&Field::new("gas", "density")).unwrap();
    for ((_, _, k), value) in density.indexed_iter() {
        let expected = if k < 2 { 0.0 } else { 1.0 };
        assert_eq!(*value, expected);
    }
}
