//! Wire models cho endpoint `generateContent` của Gemini REST API.
//!
//! Chỉ mô hình hoá phần app này cần: prompt một lượt, đúng một grounding
//! tool, và grounding metadata trong response. Các field lạ bị bỏ qua khi
//! deserialize.

use serde::{Deserialize, Serialize};

use crate::common::types::{GroundingChunk, Location, Source};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    /// Request grounding qua Google Search.
    pub fn web_grounded(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            tools: Some(vec![Tool::google_search()]),
            tool_config: None,
        }
    }

    /// Request grounding qua Google Maps, neo vào toạ độ người dùng.
    pub fn map_grounded(prompt: impl Into<String>, location: Location) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            tools: Some(vec![Tool::google_maps()]),
            tool_config: Some(ToolConfig {
                retrieval_config: Some(RetrievalConfig {
                    lat_lng: Some(LatLng::from(location)),
                }),
            }),
        }
    }
}

/// Nội dung một lượt hội thoại.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: Some(vec![Part {
                text: Some(text.into()),
            }]),
            role: None,
        }
    }
}

/// Một part của content; app này chỉ quan tâm part dạng text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Grounding tool khai báo trong request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Tool {
    GoogleSearch {
        #[serde(rename = "googleSearch")]
        google_search: GoogleSearchConfig,
    },
    GoogleMaps {
        #[serde(rename = "googleMaps")]
        google_maps: GoogleMapsConfig,
    },
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GoogleSearchConfig {}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GoogleMapsConfig {}

impl Tool {
    pub fn google_search() -> Self {
        Self::GoogleSearch {
            google_search: GoogleSearchConfig {},
        }
    }

    pub fn google_maps() -> Self {
        Self::GoogleMaps {
            google_maps: GoogleMapsConfig {},
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_config: Option<RetrievalConfig>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for LatLng {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerationResponse {
    /// Text trả lời: ghép các part text của candidate đầu tiên.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.as_ref())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Citations từ grounding metadata; rỗng nếu metadata vắng mặt.
    pub fn grounding_chunks(&self) -> Vec<GroundingChunk> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .and_then(|metadata| metadata.grounding_chunks.as_ref())
            .map(|chunks| {
                chunks
                    .iter()
                    .filter_map(|chunk| chunk.clone().into_domain())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Option<Vec<RawGroundingChunk>>,
}

/// Chunk như API trả về; uri/title đều có thể thiếu.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroundingChunk {
    #[serde(default)]
    pub web: Option<RawSource>,
    #[serde(default)]
    pub maps: Option<RawSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RawGroundingChunk {
    /// Chuyển về domain model; chunk không còn slot nào có uri thì bị loại.
    fn into_domain(self) -> Option<GroundingChunk> {
        let chunk = GroundingChunk {
            web: self.web.and_then(RawSource::into_domain),
            maps: self.maps.and_then(RawSource::into_domain),
        };
        if chunk.web.is_none() && chunk.maps.is_none() {
            None
        } else {
            Some(chunk)
        }
    }
}

impl RawSource {
    fn into_domain(self) -> Option<Source> {
        self.uri.map(|uri| Source {
            uri,
            title: self.title.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn web_request_carries_exactly_the_search_tool() {
        let request = GenerateContentRequest::web_grounded("Who won the latest F1 race?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            "Who won the latest F1 race?"
        );
        assert_eq!(value["tools"], json!([{ "googleSearch": {} }]));
        assert!(value.get("toolConfig").is_none());
    }

    #[test]
    fn map_request_carries_maps_tool_and_coordinates() {
        let location = Location {
            latitude: 34.050481,
            longitude: -118.248526,
        };
        let request = GenerateContentRequest::map_grounded("Coffee near me?", location);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["tools"], json!([{ "googleMaps": {} }]));
        let lat_lng = &value["toolConfig"]["retrievalConfig"]["latLng"];
        assert_eq!(lat_lng["latitude"], 34.050481);
        assert_eq!(lat_lng["longitude"], -118.248526);
    }

    #[test]
    fn response_text_joins_candidate_parts() {
        let response: GenerationResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "The winner was " },
                        { "text": "Max Verstappen." }
                    ],
                    "role": "model"
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "The winner was Max Verstappen.");
    }

    #[test]
    fn grounding_chunks_survive_round_trip_from_metadata() {
        let response: GenerationResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "ok" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com/page", "title": "Example" } },
                        { "maps": { "uri": "https://maps.google.com/?cid=1" } },
                        { "web": {} }
                    ]
                }
            }]
        }))
        .unwrap();

        let chunks = response.grounding_chunks();
        // Chunk thứ ba không có uri nên bị loại.
        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0].web,
            Some(Source {
                uri: "https://example.com/page".into(),
                title: "Example".into(),
            })
        );
        assert_eq!(
            chunks[1].maps,
            Some(Source {
                uri: "https://maps.google.com/?cid=1".into(),
                title: String::new(),
            })
        );
        assert!(chunks[1].web.is_none());
    }

    #[test]
    fn absent_metadata_yields_no_chunks() {
        let response: GenerationResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        }))
        .unwrap();

        assert!(response.grounding_chunks().is_empty());
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let response: GenerationResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
        assert!(response.grounding_chunks().is_empty());
    }
}
