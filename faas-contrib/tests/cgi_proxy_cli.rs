use assert_cmd::Command;

fn cgi_proxy() -> Command {
    let mut cmd = Command::cargo_bin("cgi-proxy").unwrap();
    cmd.env_remove("Http_Method")
        .env_remove("Http_Path")
        .env_remove("Http_Query")
        .env_remove("Http_Content_Type")
        .env_remove("Http_ContentLength")
        .env_remove("Http_Content_Length")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_print_maps_invocation() {
    let output = cgi_proxy()
        .arg("--print")
        .env("Http_Method", "POST")
        .env("Http_Path", "/function/flask/test")
        .env("Http_Query", "name=alice")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"REQUEST_METHOD=POST"));
    assert!(lines.contains(&"PATH_INFO=/test"));
    assert!(lines.contains(&"QUERY_STRING=name=alice"));
    assert!(lines.contains(&"SERVER_NAME=localhost"));
    assert!(lines.contains(&"SERVER_PORT=8080"));
    assert!(lines.contains(&"SERVER_PROTOCOL=HTTP/1.1"));
}

#[test]
fn test_print_defaults() {
    let output = cgi_proxy()
        .args(["--print", "--server-port", "9090"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"REQUEST_METHOD=GET"));
    assert!(lines.contains(&"PATH_INFO=/"));
    assert!(lines.contains(&"SERVER_PORT=9090"));
}

#[test]
fn test_missing_program_is_usage_error() {
    let output = cgi_proxy().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(unix)]
#[test]
fn test_program_sees_cgi_environment() {
    let output = cgi_proxy()
        .env("Http_Path", "/function/flask/hello")
        .args(["--", "sh", "-c", "printf '%s %s' \"$REQUEST_METHOD\" \"$PATH_INFO\""])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "GET /hello");
}

#[cfg(unix)]
#[test]
fn test_program_stdin_passes_through() {
    let output = cgi_proxy()
        .args(["--", "cat"])
        .write_stdin("name=alice")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "name=alice");
}

#[cfg(unix)]
#[test]
fn test_exit_code_propagates() {
    let output = cgi_proxy()
        .args(["--", "sh", "-c", "exit 3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = cgi_proxy()
        .arg("--print")
        .env("Http_Path", "/function/flask/hello")
        .env("UNRELATED_VAR", OsStr::from_bytes(b"caf\xe9"))
        .env("Http_Query", OsStr::from_bytes(b"q=\xff"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"PATH_INFO=/hello"));
    assert!(lines.contains(&"QUERY_STRING="));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Http_Query"));
}
