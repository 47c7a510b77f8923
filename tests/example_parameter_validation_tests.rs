#[cfg(test)]
mod tests {
    use glob::glob;
    use recursive_fractals::fractals::common::{generate, FigureParams};
    use recursive_fractals::fractals::depth_limit::clamp_depth_to_budget;
    use serde::de::DeserializeOwned;
    use std::any::type_name;
    use std::fs;
    use std::path::PathBuf;

    fn parse_all_parameter_files_or_panic<T: DeserializeOwned>(directory: &str) -> Vec<(PathBuf, T)> {
        let pattern = format!("{}/**/*.json", directory);
        let mut parsed = Vec::new();

        // For each match, ensure that we can (1) open the file and (2) parse it into the specified parameter type.
        for entry in glob(&pattern).expect("Failed to read glob pattern") {
            match entry {
                Ok(path) => {
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

                    let result: Result<T, _> = serde_json::from_str(&content);

                    match result {
                        Ok(params) => parsed.push((path, params)),
                        Err(err) => {
                            panic!(
                                "Failed to parse JSON file: {:?} as parameter type: `{}`.\n\n{:?}\n",
                                path,
                                type_name::<T>(),
                                err
                            );
                        }
                    }
                }
                Err(e) => panic!("Failed to read path: {:?}. Check permissions.", e),
            }
        }
        parsed
    }

    #[test]
    fn test_ensure_all_parameter_files_can_be_parsed() {
        for sub_dir in ["cantor", "sierpinski", "tree", "carpet", "snowflake"] {
            let parsed =
                parse_all_parameter_files_or_panic::<FigureParams>(&format!("params/{}", sub_dir));
            assert!(!parsed.is_empty(), "no parameter files in params/{}", sub_dir);
            for (path, params) in parsed.iter() {
                assert_eq!(params.kind.name(), sub_dir, "kind mismatch in {:?}", path);
            }
        }
    }

    #[test]
    fn test_all_parameter_files_generate() {
        for (path, params) in parse_all_parameter_files_or_panic::<FigureParams>("params") {
            let depth = clamp_depth_to_budget(params.kind, params.depth);
            let result = generate(params.kind, depth as i64, &params.region(), &params.palette);
            assert!(result.is_ok(), "{:?}: {:?}", path, result.err());
        }
    }
}
