use crate::game::types::FrameSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
  #[serde(rename = "input")]
  Input {
    x: f64,
    y: f64,
    #[serde(default)]
    boost: bool,
  },
  #[serde(rename = "viewport")]
  Viewport { width: f64, height: f64 },
  #[serde(rename = "name")]
  Name {
    #[serde(default)]
    name: String,
  },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage<'a> {
  #[serde(rename = "frame")]
  Frame { frame: &'a FrameSnapshot },
}

pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  serde_json::from_str(text).ok()
}

pub fn encode_frame(frame: &FrameSnapshot) -> serde_json::Result<String> {
  serde_json::to_string(&ServerMessage::Frame { frame })
}
