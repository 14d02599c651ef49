use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::app::branch::Branch;

#[derive(Debug)]
pub struct DirectoryError(String);

impl Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch directory error: {}", self.0)
    }
}

impl Error for DirectoryError {}

impl From<std::io::Error> for DirectoryError {
    fn from(value: std::io::Error) -> Self {
        DirectoryError(format!("{value}"))
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(value: serde_json::Error) -> Self {
        DirectoryError(format!("{value}"))
    }
}

#[derive(Deserialize)]
struct DirectoryResponse {
    data: Vec<DirectoryData>,
}

#[derive(Deserialize)]
struct DirectoryData {
    #[serde(rename(deserialize = "Brand"), default)]
    brand: Vec<DirectoryBrand>,
}

#[derive(Deserialize)]
struct DirectoryBrand {
    #[serde(rename(deserialize = "BrandName"))]
    brand_name: Option<String>,
    #[serde(rename(deserialize = "Branch"), default)]
    branch: Vec<Branch>,
}

impl From<DirectoryResponse> for Vec<Branch> {
    fn from(response: DirectoryResponse) -> Self {
        response
            .data
            .into_iter()
            .flat_map(|data| data.brand)
            .flat_map(|brand| {
                info!(
                    "Read {} branches of brand {}",
                    brand.branch.len(),
                    brand.brand_name.as_deref().unwrap_or("<unnamed>")
                );
                brand.branch
            })
            .collect()
    }
}

/// Reads either a bare list of branches or a full directory response.
pub fn read_branches<R: Read>(mut reader: R) -> Result<Vec<Branch>, DirectoryError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    let first_token = content.iter().find(|byte| !byte.is_ascii_whitespace());
    if first_token == Some(&b'[') {
        Ok(serde_json::from_slice::<Vec<Branch>>(&content)?)
    } else {
        Ok(serde_json::from_slice::<DirectoryResponse>(&content)?.into())
    }
}

pub fn load_branches(path: &Path) -> Result<Vec<Branch>, DirectoryError> {
    let file = File::open(path)
        .map_err(|e| DirectoryError(format!("Could not open {}: {e}", path.display())))?;
    read_branches(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::branch::Geolocated;
    use crate::app::coordinates::Coordinates;
    use crate::app::finder::closest_branches_to;

    #[test]
    fn it_reads_a_list_of_branches() {
        let json = r#"[
            { "Identification": "a", "PostalAddress": { "GeoLocation": {
                "GeographicCoordinates": { "Latitude": "1.5", "Longitude": "2.5" } } } },
            { "Identification": "b" }
        ]"#;
        let branches = read_branches(json.as_bytes()).unwrap();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].coordinates(), Some(Coordinates::new(1.5, 2.5)));
        assert_eq!(branches[1].coordinates(), None);
    }

    #[test]
    fn it_flattens_a_directory_response() {
        let json = r#"{
            "meta": { "TotalResults": 3 },
            "data": [{
                "Brand": [
                    { "BrandName": "North", "Branch": [
                        { "Identification": "n1" }, { "Identification": "n2" }
                    ] },
                    { "BrandName": "South", "Branch": [ { "Identification": "s1" } ] }
                ]
            }]
        }"#;
        let branches = read_branches(json.as_bytes()).unwrap();
        let ids: Vec<&str> = branches
            .iter()
            .map(|branch| branch.identification.as_str())
            .collect();
        assert_eq!(ids, vec!["n1", "n2", "s1"]);
    }

    #[test]
    fn it_skips_branches_with_unusable_coordinates() {
        let json = r#"[
            { "Identification": "good", "PostalAddress": { "GeoLocation": {
                "GeographicCoordinates": { "Latitude": "1.5", "Longitude": "2.5" } } } },
            { "Identification": "null", "PostalAddress": { "GeoLocation": {
                "GeographicCoordinates": { "Latitude": null, "Longitude": "2.5" } } } },
            { "Identification": "bool", "PostalAddress": { "GeoLocation": {
                "GeographicCoordinates": { "Latitude": "1.5", "Longitude": false } } } }
        ]"#;
        let branches = read_branches(json.as_bytes()).unwrap();
        assert_eq!(branches.len(), 3);
        let closest = closest_branches_to(&Coordinates::new(0.0, 0.0), &branches).unwrap();
        assert_eq!(closest.len(), 1);
        assert_eq!(closest[0].identification, "good");
    }

    #[test]
    fn it_reports_where_the_json_is_malformed() {
        let error = read_branches("{ not json".as_bytes()).unwrap_err();
        assert!(error.to_string().starts_with("Branch directory error"));
        assert!(error.to_string().contains("line 1 column 3"));

        let error = read_branches(r#"{ "data": 3 }"#.as_bytes()).unwrap_err();
        assert!(error.to_string().contains("expected a sequence"));

        let error = read_branches("[\n  { \"Name\": \"no id\" }\n]".as_bytes()).unwrap_err();
        assert!(error.to_string().contains("missing field `Identification`"));
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn it_fails_on_missing_file() {
        let error = load_branches(Path::new("./does/not/exist.json")).unwrap_err();
        assert!(error.to_string().contains("does/not/exist.json"));
    }
}
