// Purpose: Voice management, polyphony, note bookkeeping
// This layer sits below the engine: it owns voices, never the queue.

pub mod held;
pub mod message;
pub mod note_set;
pub mod pool;
pub mod voice;
