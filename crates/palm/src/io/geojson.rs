use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value, feature::Id};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{error::Result, pipeline::PalmAnalysis};

const KIND: &str = "kind";

fn number(value: f64) -> JsonValue {
    Number::from_f64(value).map(JsonValue::Number).unwrap_or(JsonValue::Null)
}

impl PalmAnalysis {
    /// Mounts as `Point` features followed by analyzed lines as `LineString` features
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::new();

        for (mount, point) in self.mounts.iter() {
            let mut properties = Map::new();
            properties.insert(KIND.to_string(), JsonValue::from("mount"));
            properties.insert("name".to_string(), JsonValue::from(mount.to_string()));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![point.x, point.y]))),
                id: Some(Id::String(mount.to_string())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        for (i, line) in self.lines.iter().enumerate() {
            // Descriptor fields become flat properties
            let mut properties = match serde_json::to_value(&line.descriptor)? {
                JsonValue::Object(map) => map,
                _ => Map::new(),
            };
            properties.insert(KIND.to_string(), JsonValue::from("line"));
            properties.insert("label".to_string(), JsonValue::from(line.label.clone()));
            properties.insert("category".to_string(), JsonValue::from(line.category.to_string()));
            properties.insert("length_class".to_string(), JsonValue::from(line.length_class.to_string()));
            if let Some(text) = &line.interpretation {
                properties.insert("interpretation".to_string(), JsonValue::from(text.clone()));
            }

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&line.to_line_string()))),
                id: Some(Id::Number(Number::from(i))),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let mut foreign_members = Map::new();
        foreign_members.insert("image_width".to_string(), JsonValue::from(self.image_width));
        foreign_members.insert("image_height".to_string(), JsonValue::from(self.image_height));
        foreign_members.insert("rotation".to_string(), JsonValue::from(self.rotation.degrees()));
        foreign_members.insert("palm_width".to_string(), number(self.mounts.palm_width));
        foreign_members.insert("palm_length".to_string(), number(self.mounts.palm_length));
        foreign_members.insert("line_count".to_string(), JsonValue::from(self.lines.len()));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
