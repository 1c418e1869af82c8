//! Lua sandbox for dynamically registered tools.
//!
//! Tool source comes from the operator at runtime, so the VM gets only
//! pure computation: `string`, `table`, `math` and `utf8`. Nothing that
//! reaches the filesystem, the process or the loader survives, memory is
//! capped, and a VM hook aborts a call once its instruction budget is spent.

use mlua::prelude::*;
use mlua::{HookTriggers, LuaOptions, StdLib, VmState};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Globals removed after the standard libraries are loaded.
const REMOVED_GLOBALS: [&str; 6] = [
    "load",
    "loadstring",
    "dofile",
    "loadfile",
    "require",
    "collectgarbage",
];

/// Hook granularity, in VM instructions.
const HOOK_INTERVAL: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxLimits {
    pub memory_limit_bytes: usize,
    /// Instructions per call
    pub instruction_limit: u64,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self {
            memory_limit_bytes: 16 * 1024 * 1024,
            instruction_limit: 10_000_000,
        }
    }
}

/// A restricted VM plus the per-call instruction counter its hook reads.
pub(crate) struct Sandbox {
    pub(crate) lua: Lua,
    executed: Arc<AtomicU64>,
    instruction_limit: u64,
}

impl Sandbox {
    pub(crate) fn new(limits: SandboxLimits) -> LuaResult<Self> {
        let lua = Lua::new_with(
            StdLib::STRING | StdLib::TABLE | StdLib::MATH | StdLib::UTF8,
            LuaOptions::default(),
        )?;

        let globals = lua.globals();
        for name in REMOVED_GLOBALS {
            globals.set(name, LuaValue::Nil)?;
        }

        lua.set_memory_limit(limits.memory_limit_bytes)?;

        let executed = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&executed);
        let budget = limits.instruction_limit;
        lua.set_hook(
            HookTriggers::new().every_nth_instruction(HOOK_INTERVAL),
            move |_lua, _debug| {
                let used = counter.fetch_add(u64::from(HOOK_INTERVAL), Ordering::Relaxed)
                    + u64::from(HOOK_INTERVAL);
                if used > budget {
                    return Err(LuaError::runtime(format!(
                        "instruction limit of {} exceeded",
                        budget
                    )));
                }
                Ok(VmState::Continue)
            },
        );

        Ok(Self {
            lua,
            executed,
            instruction_limit: budget,
        })
    }

    /// Start a fresh instruction budget.
    pub(crate) fn reset_budget(&self) {
        self.executed.store(0, Ordering::Relaxed);
    }

    /// Whether the current call ran out of instructions.
    pub(crate) fn budget_exhausted(&self) -> bool {
        self.executed.load(Ordering::Relaxed) > self.instruction_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> Sandbox {
        Sandbox::new(SandboxLimits::default()).unwrap()
    }

    #[test]
    fn test_dangerous_libraries_absent() {
        let sandbox = sandbox();
        for name in ["os", "io", "package", "debug"] {
            let value: LuaValue = sandbox.lua.globals().get(name).unwrap();
            assert_eq!(value, LuaValue::Nil, "{} should not be loaded", name);
        }
    }

    #[test]
    fn test_loader_globals_removed() {
        let sandbox = sandbox();
        for name in REMOVED_GLOBALS {
            let value: LuaValue = sandbox.lua.globals().get(name).unwrap();
            assert_eq!(value, LuaValue::Nil, "{} should be removed", name);
        }
    }

    #[test]
    fn test_pure_libraries_available() {
        let sandbox = sandbox();
        let upper: String = sandbox.lua.load("string.upper('hello')").eval().unwrap();
        assert_eq!(upper, "HELLO");
        let joined: String = sandbox
            .lua
            .load("table.concat({'a', 'b', 'c'}, ', ')")
            .eval()
            .unwrap();
        assert_eq!(joined, "a, b, c");
        let floor: i64 = sandbox.lua.load("math.floor(3.7)").eval().unwrap();
        assert_eq!(floor, 3);
    }

    #[test]
    fn test_instruction_budget_stops_runaway_loop() {
        let sandbox = Sandbox::new(SandboxLimits {
            instruction_limit: 100_000,
            ..Default::default()
        })
        .unwrap();
        let err = sandbox.lua.load("while true do end").exec().unwrap_err();
        assert!(err.to_string().contains("instruction limit"));
    }

    #[test]
    fn test_budget_resets_between_calls() {
        let sandbox = Sandbox::new(SandboxLimits {
            instruction_limit: 200_000,
            ..Default::default()
        })
        .unwrap();
        let script = "local n = 0 for i = 1, 20000 do n = n + i end return n";
        for _ in 0..10 {
            sandbox.reset_budget();
            let n: i64 = sandbox.lua.load(script).eval().unwrap();
            assert_eq!(n, 200_010_000);
        }
    }

    #[test]
    fn test_memory_limit() {
        let sandbox = Sandbox::new(SandboxLimits {
            memory_limit_bytes: 1024 * 1024,
            instruction_limit: u64::MAX,
        })
        .unwrap();
        let result = sandbox
            .lua
            .load("local t = {} for i = 1, 1e7 do t[i] = string.rep('x', 64) .. i end")
            .exec();
        assert!(result.is_err());
    }
}
