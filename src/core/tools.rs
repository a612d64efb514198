//! Name-based dispatch of the public queries.
//!
//! Each query is exposed as a tool with a stable name so callers can invoke
//! it from JSON: `{"id": 1, "tool": "get_system_overview"}`.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::monitor::{CategoryQuery, ResourceMonitor};
use crate::error::{ResmonError, Result};
use crate::platform::command::CommandRunner;

/// Pseudo tool that lists the real ones
pub const LIST_TOOLS: &str = "list_tools";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ResourceIntensiveProcesses,
    ProcessesByCategory,
    SystemOverview,
}

impl Tool {
    pub const ALL: [Tool; 3] = [
        Tool::ResourceIntensiveProcesses,
        Tool::ProcessesByCategory,
        Tool::SystemOverview,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::ResourceIntensiveProcesses => "get_resource_intensive_processes",
            Tool::ProcessesByCategory => "get_processes_by_category",
            Tool::SystemOverview => "get_system_overview",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::ResourceIntensiveProcesses => {
                "Top CPU, memory and network consuming processes"
            }
            Tool::ProcessesByCategory => {
                "Sorted, paginated process list for one category \
                 (process_type, page, page_size, sort_by, sort_order)"
            }
            Tool::SystemOverview => {
                "CPU, memory, disk, network and host snapshot with a performance analysis"
            }
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ResmonError;

    fn from_str(s: &str) -> Result<Self> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s.trim())
            .ok_or_else(|| {
                let names: Vec<&str> = Tool::ALL.iter().map(Tool::name).collect();
                ResmonError::invalid_argument(format!(
                    "Unknown tool '{}'. Available tools: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn list_tools() -> Vec<ToolInfo> {
    Tool::ALL
        .iter()
        .map(|tool| ToolInfo {
            name: tool.name(),
            description: tool.description(),
        })
        .collect()
}

/// One line of dispatcher input
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub tool: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// One line of dispatcher output; exactly one of `result` and `error` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    fn result(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, error: impl fmt::Display) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Run one tool by name. `arguments` may be absent or `null` for tools that
/// take none.
pub fn call_tool<R: CommandRunner>(
    monitor: &ResourceMonitor<R>,
    name: &str,
    arguments: Option<Value>,
) -> Result<Value> {
    if name.trim() == LIST_TOOLS {
        return Ok(serde_json::to_value(list_tools())?);
    }

    let tool: Tool = name.parse()?;
    debug!("Calling tool {}", tool);

    let result = match tool {
        Tool::ResourceIntensiveProcesses => {
            serde_json::to_value(monitor.resource_intensive_processes())?
        }
        Tool::ProcessesByCategory => {
            let arguments = arguments.unwrap_or(Value::Null);
            let query: CategoryQuery = serde_json::from_value(arguments).map_err(|e| {
                ResmonError::invalid_argument(format!("Invalid arguments for {}: {}", tool, e))
            })?;
            serde_json::to_value(monitor.processes_by_category(&query))?
        }
        Tool::SystemOverview => serde_json::to_value(monitor.system_overview())?,
    };

    Ok(result)
}

/// Handle one raw request line. Malformed input becomes an error response;
/// nothing here fails the caller's loop.
pub fn handle_line<R: CommandRunner>(monitor: &ResourceMonitor<R>, line: &str) -> ToolResponse {
    let request: ToolRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting malformed request: {}", e);
            return ToolResponse::error(None, format!("Malformed request: {}", e));
        }
    };

    match call_tool(monitor, &request.tool, request.arguments) {
        Ok(result) => ToolResponse::result(request.id, result),
        Err(ResmonError::InvalidArgument(message)) => ToolResponse::error(request.id, message),
        Err(e) => ToolResponse::error(request.id, e),
    }
}

/// Answer line-delimited requests from `input` until EOF, one response line
/// per non-blank request line. Lines that are not valid UTF-8 are decoded
/// lossily and then rejected like any other malformed request, so the loop
/// only stops on EOF or an I/O error. Returns the number of requests answered.
pub fn serve<R, I, O>(monitor: &ResourceMonitor<R>, mut input: I, mut output: O) -> Result<usize>
where
    R: CommandRunner,
    I: BufRead,
    O: Write,
{
    let mut buf = Vec::new();
    let mut answered = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(monitor, &line);
        writeln!(output, "{}", serde_json::to_string(&response)?)?;
        output.flush()?;
        answered += 1;
    }

    Ok(answered)
}
