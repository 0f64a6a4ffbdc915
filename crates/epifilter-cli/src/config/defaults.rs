use std::path::PathBuf;

pub struct DefaultsConfig {
    pub discotope_dir: PathBuf,
    pub annotation_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            discotope_dir: PathBuf::from("Discotope"),
            annotation_dir: PathBuf::from("Initial_Data"),
            output_dir: PathBuf::from("Filtered_Discotope_LPXTG"),
        }
    }
}
