//! The frame stack (§4.4, §9): an ordered sequence of `IndexMap`s, the
//! grounding for which is `leo-interpreter`'s own reliance on
//! `indexmap::IndexMap` for its environment bindings. Function calls push
//! one frame above the global frame and hide every frame beneath it except
//! the global — there are no nested closures.

use indexmap::IndexMap;
use timon_value::Value;

pub struct Environment {
    /// `frames[0]` is always the global frame.
    frames: Vec<IndexMap<String, Value>>,
    /// For each currently active function call, the index into `frames`
    /// where its call frame starts; variable lookup below that index (other
    /// than frame 0) is invisible. Top-level execution has no entry here,
    /// so the window always starts at frame 0.
    call_windows: Vec<usize>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { frames: vec![IndexMap::new()], call_windows: Vec::new() }
    }

    fn window_start(&self) -> usize {
        self.call_windows.last().copied().unwrap_or(0)
    }

    /// Pushes a plain block frame (if/else branch, from-loop body).
    pub fn push_block(&mut self) {
        self.frames.push(IndexMap::new());
    }

    pub fn pop_block(&mut self) {
        self.frames.pop();
    }

    /// Pushes a call frame pre-populated with parameter bindings, and
    /// narrows visibility to it plus the global frame.
    pub fn push_call(&mut self, bindings: IndexMap<String, Value>) {
        self.frames.push(bindings);
        self.call_windows.push(self.frames.len() - 1);
    }

    pub fn pop_call(&mut self) {
        self.frames.pop();
        self.call_windows.pop();
    }

    /// The innermost frame, where `var` introduces new bindings.
    fn current_mut(&mut self) -> &mut IndexMap<String, Value> {
        self.frames.last_mut().expect("frame stack is never empty")
    }

    pub fn declare(&mut self, name: &str, value: Value) -> Result<(), ()> {
        let frame = self.current_mut();
        if frame.contains_key(name) {
            return Err(());
        }
        frame.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let start = self.window_start();
        for frame in self.frames[start..].iter().rev() {
            if let Some(v) = frame.get(name) {
                return Some(v);
            }
        }
        if start != 0 {
            self.frames[0].get(name)
        } else {
            None
        }
    }

    /// Finds the nearest visible frame binding `name` and overwrites it.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), ()> {
        let start = self.window_start();
        for frame in self.frames[start..].iter_mut().rev() {
            if let Some(slot) = frame.get_mut(name) {
                *slot = value;
                return Ok(());
            }
        }
        if start != 0 {
            if let Some(slot) = self.frames[0].get_mut(name) {
                *slot = value;
                return Ok(());
            }
        }
        Err(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_def_in_same_frame_twice_is_rejected() {
        let mut env = Environment::new();
        assert!(env.declare("x", Value::Number(1)).is_ok());
        assert!(env.declare("x", Value::Number(2)).is_err());
    }

    #[test]
    fn block_frames_see_outer_bindings() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1)).unwrap();
        env.push_block();
        assert_eq!(env.get("x"), Some(&Value::Number(1)));
        env.pop_block();
    }

    #[test]
    fn call_frames_do_not_see_caller_locals() {
        let mut env = Environment::new();
        env.push_block();
        env.declare("outer", Value::Number(1)).unwrap();
        let mut params = IndexMap::new();
        params.insert("x".to_string(), Value::Number(42));
        env.push_call(params);
        assert_eq!(env.get("x"), Some(&Value::Number(42)));
        assert_eq!(env.get("outer"), None);
        env.pop_call();
        assert_eq!(env.get("outer"), Some(&Value::Number(1)));
        env.pop_block();
    }

    #[test]
    fn call_frames_do_see_the_global_frame() {
        let mut env = Environment::new();
        env.declare("g", Value::Number(7)).unwrap();
        env.push_block();
        env.declare("hidden_from_call", Value::Number(9)).unwrap();
        let mut params = IndexMap::new();
        params.insert("x".to_string(), Value::Number(1));
        env.push_call(params);
        assert_eq!(env.get("g"), Some(&Value::Number(7)));
        assert_eq!(env.get("hidden_from_call"), None);
        env.pop_call();
        env.pop_block();
    }

    #[test]
    fn assign_updates_nearest_visible_binding() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1)).unwrap();
        env.push_block();
        assert!(env.assign("x", Value::Number(2)).is_ok());
        env.pop_block();
        assert_eq!(env.get("x"), Some(&Value::Number(2)));
    }
}
