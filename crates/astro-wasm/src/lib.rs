use js_sys::{Float32Array, Object, Reflect, Uint32Array};
use wasm_bindgen::prelude::*;

use astro_core::{
    random_seed_text, ConfigError, GenerationProfile, PlanetGenerator, PlanetSummary,
    TerrainConfig,
};

/// Buffers handed to the renderer. Arrays are flat, three floats per vertex.
#[derive(Debug)]
pub struct PlanetBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
    pub summary: PlanetSummary,
}

impl PlanetBuffers {
    /// Parse `config_json`, resolve `profile` and run the generator.
    pub fn build(config_json: &str, profile: &str) -> Result<Self, ConfigError> {
        let config = TerrainConfig::from_json(config_json)?;
        let profile = GenerationProfile::by_name(profile)?;
        let planet = PlanetGenerator::with_profile(profile).generate(&config);
        Ok(Self {
            positions: planet.mesh.flat_positions(),
            normals: planet.mesh.flat_normals(),
            colors: planet.mesh.flat_colors(),
            indices: planet.mesh.indices,
            summary: planet.summary,
        })
    }

    fn to_js(&self) -> Result<JsValue, JsValue> {
        let obj = Object::new();
        let set = |key: &str, value: &JsValue| Reflect::set(&obj, &JsValue::from_str(key), value);
        set("positions", &Float32Array::from(self.positions.as_slice()))?;
        set("normals", &Float32Array::from(self.normals.as_slice()))?;
        set("colors", &Float32Array::from(self.colors.as_slice()))?;
        set("indices", &Uint32Array::from(self.indices.as_slice()))?;
        set("summary", &serde_wasm_bindgen::to_value(&self.summary)?)?;
        Ok(obj.into())
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Generate a planet with the classic profile.
///
/// `config_json` is a `TerrainConfig`; missing fields take their defaults.
/// Returns `{ positions, normals, colors, indices, summary }` where the four
/// buffers are `Float32Array`/`Uint32Array`.
#[wasm_bindgen]
pub fn generate(config_json: &str) -> Result<JsValue, JsValue> {
    generate_with_profile(config_json, GenerationProfile::CLASSIC)
}

/// Same as [`generate`] with a named profile (`classic` or `polar`).
#[wasm_bindgen(js_name = generateWithProfile)]
pub fn generate_with_profile(config_json: &str, profile: &str) -> Result<JsValue, JsValue> {
    PlanetBuffers::build(config_json, profile).map_err(to_js_error)?.to_js()
}

/// Only the summary statistics, as a JSON string.
#[wasm_bindgen(js_name = generateSummary)]
pub fn generate_summary(config_json: &str, profile: &str) -> Result<String, JsValue> {
    summary_json(config_json, profile).map_err(to_js_error)
}

fn summary_json(config_json: &str, profile: &str) -> Result<String, ConfigError> {
    let buffers = PlanetBuffers::build(config_json, profile)?;
    Ok(serde_json::to_string(&buffers.summary)?)
}

/// A fresh `CORE-XXXX` seed for the "randomise" button.
#[wasm_bindgen(js_name = randomSeed)]
pub fn random_seed() -> String {
    random_seed_text("CORE")
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn field(obj: &JsValue, key: &str) -> JsValue {
        Reflect::get(obj, &JsValue::from_str(key)).unwrap()
    }

    #[wasm_bindgen_test]
    fn generate_returns_typed_buffers() {
        let out = generate(r#"{"seed":"TEST-1","detail":3,"rivers":4}"#).unwrap();
        let n = field(&field(&out, "summary"), "vertex_count").as_f64().unwrap() as u32;
        assert_eq!(n, 10 * 4 * 4 + 2);
        for key in ["positions", "normals", "colors"] {
            let buf = field(&out, key).dyn_into::<Float32Array>().unwrap();
            assert_eq!(buf.length(), 3 * n);
        }
        let indices = field(&out, "indices").dyn_into::<Uint32Array>().unwrap();
        assert_eq!(indices.length() % 3, 0);
    }

    #[wasm_bindgen_test]
    fn generate_rejects_bad_profile() {
        assert!(generate_with_profile("{}", "lunar").is_err());
    }
}
