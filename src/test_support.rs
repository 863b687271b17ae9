use crate::error::Result;
use crate::provision::Prompter;
use crate::session::CommandRunner;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Prompter that replays canned answers and records every question asked.
///
/// Running out of answers (or an empty answer) yields the prompt's default.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    inputs: VecDeque<String>,
    confirms: VecDeque<bool>,
    pub(crate) asked: Vec<String>,
}

impl ScriptedPrompter {
    pub(crate) fn new<I, S, C>(inputs: I, confirms: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = bool>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            confirms: confirms.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        match self.inputs.pop_front() {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(default.to_string()),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        self.asked.push(prompt.to_string());
        Ok(self.confirms.pop_front().unwrap_or(default))
    }
}

/// Command runner that records invocations instead of spawning processes.
///
/// Exit codes are handed out in order; once exhausted every call exits 0.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    exit_codes: RefCell<VecDeque<Option<i32>>>,
    pub(crate) calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub(crate) fn with_exit_codes<I: IntoIterator<Item = Option<i32>>>(codes: I) -> Self {
        Self {
            exit_codes: RefCell::new(codes.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Each call as `program arg...`.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.join(" ")).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run_interactive(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.borrow_mut().push(call);
        Ok(self.exit_codes.borrow_mut().pop_front().unwrap_or(Some(0)))
    }
}
