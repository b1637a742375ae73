/// Replaces every non-overlapping `$$` in `line` with the decimal form of
/// `pid`. Substituted digits are never rescanned, so the pass is a single
/// left-to-right sweep over the input.
pub fn expand_pid(line: &str, pid: u32) -> String {
    let pid_str = pid.to_string();
    let mut expanded = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find("$$") {
        expanded.push_str(&rest[..pos]);
        expanded.push_str(&pid_str);
        rest = &rest[pos + 2..];
    }
    expanded.push_str(rest);
    expanded
}
