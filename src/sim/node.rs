//! System nodes and their packet buffers

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::packet::Packet;
use crate::consts::BUFFER_CAPACITY;
use crate::same_port;

/// Stable node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Offset of ports from the node center
const PORT_OFFSET_X: f32 = 20.0;
const PORT_OFFSET_Y: f32 = 10.0;

/// A buffering system node with fixed ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemNode {
    pub id: NodeId,
    pub pos: Vec2,
    pub inputs: Vec<Vec2>,
    pub outputs: Vec<Vec2>,
    buffer: VecDeque<Packet>,
}

impl SystemNode {
    /// Node with two inputs on the left and two outputs on the right
    pub fn new(id: NodeId, pos: Vec2) -> Self {
        let inputs = vec![
            pos + Vec2::new(-PORT_OFFSET_X, -PORT_OFFSET_Y),
            pos + Vec2::new(-PORT_OFFSET_X, PORT_OFFSET_Y),
        ];
        let outputs = vec![
            pos + Vec2::new(PORT_OFFSET_X, -PORT_OFFSET_Y),
            pos + Vec2::new(PORT_OFFSET_X, PORT_OFFSET_Y),
        ];
        Self::with_ports(id, pos, inputs, outputs)
    }

    pub fn with_ports(id: NodeId, pos: Vec2, inputs: Vec<Vec2>, outputs: Vec<Vec2>) -> Self {
        Self {
            id,
            pos,
            inputs,
            outputs,
            buffer: VecDeque::with_capacity(BUFFER_CAPACITY),
        }
    }

    pub fn has_input(&self, port: Vec2) -> bool {
        self.inputs.iter().any(|&p| same_port(p, port))
    }

    pub fn has_output(&self, port: Vec2) -> bool {
        self.outputs.iter().any(|&p| same_port(p, port))
    }

    pub fn can_store(&self) -> bool {
        self.buffer.len() < BUFFER_CAPACITY
    }

    /// Queue a packet. Hands it back if the buffer is full.
    pub fn store(&mut self, packet: Packet) -> Result<(), Packet> {
        if !self.can_store() {
            return Err(packet);
        }
        self.buffer.push_back(packet);
        Ok(())
    }

    /// Take the oldest buffered packet
    pub fn release(&mut self) -> Option<Packet> {
        self.buffer.pop_front()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> impl Iterator<Item = &Packet> {
        self.buffer.iter()
    }

    pub(crate) fn buffer_mut(&mut self) -> impl Iterator<Item = &mut Packet> {
        self.buffer.iter_mut()
    }
}
