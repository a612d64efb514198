//! Recorded macOS tool output shared by the integration tests.

use resmon::core::{Config, ResourceMonitor};
use resmon::platform::CannedRunner;

pub const PS_CPU: &str = "  PID  %CPU COMM
  812  45.0 /Applications/Google Chrome.app/Contents/MacOS/Google Chrome
   77  12.5 /usr/sbin/WindowServer
  300   3.2 zsh
  bad  line here
    1   0.0 /sbin/launchd
";

pub const PS_MEMORY: &str = "  PID %MEM      RSS COMM
  812  8.5  1398100 /Applications/Google Chrome.app/Contents/MacOS/Google Chrome
  420  3.1   512000 /Applications/Slack.app/Contents/MacOS/Slack
   77  1.2   196000 /usr/sbin/WindowServer
  300  0.1     4096 zsh
";

pub const LSOF: &str = "COMMAND     PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
Google      812 alice  23u  IPv4 0x1234567890abcdef      0t0  TCP 10.0.0.2:50123->142.250.1.1:443 (ESTABLISHED)
Google      812 alice  24u  IPv4 0x1234567890abcdf0      0t0  TCP 10.0.0.2:50124->142.250.1.2:443 (ESTABLISHED)
Google      815 alice  25u  IPv6 0x1234567890abcdf1      0t0  UDP *:5353
Slack       420 alice  30u  IPv4 0x1234567890abcdf2      0t0  TCP 10.0.0.2:50200->3.3.3.3:443 (ESTABLISHED)
Slack       420 alice  31u  IPv4 0x1234567890abcdf3      0t0  TCP 10.0.0.2:50201->3.3.3.4:443 (ESTABLISHED)
rapportd    350 alice   4u  IPv4 0x1234567890abcdf4      0t0  TCP *:49152 (LISTEN)
";

pub const TOP: &str = "Processes: 512 total, 3 running, 509 sleeping, 2381 threads
2025/01/15 10:15:00
Load Avg: 12.50, 10.00, 9.00
CPU usage: 70.5% user, 20.0% sys, 9.5% idle
SharedLibs: 512M resident, 90M data, 40M linkedit.
";

pub const UPTIME: &str = "10:15  up 3 days,  2:04, 2 users, load averages: 12.50 10.00 9.00";

pub const VM_STAT: &str = "Mach Virtual Memory Statistics: (page size of 4096 bytes)
Pages free:                               10000.
Pages active:                            200000.
Pages inactive:                          100000.
Pages speculative:                         5000.
Pages throttled:                              0.
Pages wired down:                         50000.
";

pub const DF: &str = "Filesystem       Size   Used  Avail Capacity iused      ifree %iused  Mounted on
/dev/disk3s1s1  460Gi  300Gi  150Gi    67%  404k 1.5G    0%   /
devfs          200Ki  200Ki    0Bi   100%    694          0  100%   /dev
/dev/disk3s6    460Gi   20Gi  150Gi    12%      20 1.5G    0%   /System/Volumes/VM
/dev/disk5s1    1.0Ti  512Gi  512Gi    50%     1k  4.2G    0%   /Volumes/Backup Drive
";

pub const NETSTAT_I: &str = "Name       Mtu   Network       Address            Ipkts Ierrs Idrop    Opkts Oerrs  Coll
lo0        16384 <Link#1>                        123456     0     0   123456     0     0
en0        1500  <Link#6>    a4:83:e7:12:34:56  9876543     2     0  5432109     1     0
";

pub const NETSTAT_AN: &str = "Active Internet connections (including servers)
Proto Recv-Q Send-Q  Local Address          Foreign Address        (state)
tcp4       0      0  10.0.0.2.50123         142.250.1.1.443        ESTABLISHED
tcp4       0      0  10.0.0.2.50124         142.250.1.2.443        ESTABLISHED
tcp6       0      0  *.49152                *.*                    LISTEN
udp4       0      0  *.5353                 *.*
";

/// Process listings only
pub fn process_runner() -> CannedRunner {
    CannedRunner::new()
        .with_output("ps -eo pid,%cpu,comm -r", PS_CPU)
        .with_output("ps -eo pid,pmem,rss,comm -m", PS_MEMORY)
        .with_output("lsof -i -n -P", LSOF)
}

/// Every tool the monitor uses
pub fn full_runner() -> CannedRunner {
    process_runner()
        .with_output("top -l 1 -n 0", TOP)
        .with_output("uptime", UPTIME)
        .with_output("sysctl -n hw.ncpu", "8")
        .with_output("vm_stat", VM_STAT)
        .with_output("sysctl -n hw.memsize", "4294967296")
        .with_output("df -h", DF)
        .with_output("netstat -i", NETSTAT_I)
        .with_output("netstat -an", NETSTAT_AN)
        .with_output("sw_vers -productVersion", "14.5")
}

pub fn monitor(runner: CannedRunner) -> ResourceMonitor<CannedRunner> {
    ResourceMonitor::new(runner, Config::default())
}
