//! Pre-built filesystem scenarios for tests and non-Linux demo runs.

use super::MockFs;

impl MockFs {
    /// A small desktop: four processes, one GPU client, one listening and one
    /// established socket, two disks and one DRM card.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        // System-wide files
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        let mut cpuinfo = String::new();
        for cpu in 0..4 {
            cpuinfo.push_str(&format!(
                "processor\t: {}\nmodel name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz\ncpu MHz\t\t: 1800.000\ncpu cores\t: 4\n\n",
                cpu
            ));
        }
        fs.add_file("/proc/cpuinfo", cpuinfo);
        fs.add_file("/proc/sys/kernel/osrelease", "6.8.0-45-generic\n");
        fs.add_file(
            "/etc/os-release",
            "NAME=\"Ubuntu\"\nVERSION=\"24.04.1 LTS (Noble Numbat)\"\nPRETTY_NAME=\"Ubuntu 24.04.1 LTS\"\n",
        );
        fs.add_file(
            "/sys/devices/virtual/dmi/id/product_name",
            "Standard PC (Q35 + ICH9, 2009)\n",
        );

        // Processes
        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 50000 1000000 100 500 1000 500 20000 5000 20 0 1 0 1 170000000 3000 18446744073709551615 1 1 0 0 0 0 671173123 4096 1260 0 0 0 17 0 0 0 100 0 0 0 0 0 0 0 0 0 0",
            "41504 3000 2000 300 0 5000 0\n",
            "Name:\tsystemd\nUid:\t0\t0\t0\t0\nVmRSS:\t   12000 kB\nVmSwap:\t       0 kB\n",
            "rchar: 100000\nwchar: 50000\nread_bytes: 4096000\nwrite_bytes: 2048000\n",
            "/sbin/init\0splash\0",
            "systemd\n",
        );
        fs.add_process(
            420,
            "420 (sshd) S 1 420 420 0 -1 4194560 2000 0 10 0 50 20 0 0 20 0 1 0 500 15000000 1500 18446744073709551615 0 0 0 0 0 0 0 4096 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "3662 1500 1200 200 0 400 0\n",
            "Name:\tsshd\nUid:\t0\t0\t0\t0\nVmRSS:\t    6000 kB\nVmSwap:\t      64 kB\n",
            "rchar: 1000\nwchar: 1000\nread_bytes: 0\nwrite_bytes: 0\n",
            "sshd: /usr/sbin/sshd -D\0",
            "sshd\n",
        );
        fs.add_link("/proc/420/fd/3", "socket:[31337]");
        fs.add_process(
            1500,
            "1500 (Xorg) S 1 1500 1500 1025 1500 4194560 90000 0 300 0 30000 9000 0 0 20 0 8 0 1200 900000000 40000 18446744073709551615 0 0 0 0 0 0 0 4096 0 0 0 0 17 2 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "219726 40000 9000 600 0 80000 0\n",
            "Name:\tXorg\nUid:\t0\t0\t0\t0\nVmRSS:\t  160000 kB\nVmSwap:\t       0 kB\n",
            "rchar: 900000\nwchar: 400000\nread_bytes: 12288000\nwrite_bytes: 409600\n",
            "/usr/lib/xorg/Xorg\0:0\0vt1\0",
            "Xorg\n",
        );
        fs.add_link("/proc/1500/fd/0", "/dev/null");
        fs.add_link("/proc/1500/fd/14", "/dev/dri/renderD128");
        fs.add_file(
            "/proc/1500/fdinfo/14",
            "pos:\t0\nflags:\t02100002\ndrm-driver:\tamdgpu\ndrm-client-id:\t3\ndrm-engine-gfx:\t4200000000 ns\ndrm-memory-vram:\t65536 KiB\n",
        );
        fs.add_process(
            2001,
            "2001 (firefox) S 1500 2001 2001 0 -1 4194304 500000 0 2000 0 90000 15000 0 0 20 0 60 0 60000 4000000000 250000 18446744073709551615 0 0 0 0 0 0 0 4096 0 0 0 0 17 3 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "976562 250000 40000 900 0 500000 0\n",
            "Name:\tfirefox\nUid:\t1000\t1000\t1000\t1000\nVmRSS:\t 1000000 kB\nVmSwap:\t    2048 kB\n",
            "",
            "/usr/lib/firefox/firefox\0",
            "firefox\n",
        );
        fs.add_link("/proc/2001/fd/41", "socket:[45678]");

        // Sockets
        fs.add_file(
            "/proc/net/tcp",
            "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 31337 1 0000000000000000 100 0 0 10 0
   1: 0F02000A:A3C2 2E1E5B8E:01BB 01 00000000:00000000 02:0000041D 00000000  1000        0 45678 2 0000000000000000 20 4 30 10 -1
",
        );
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
  eth0: 98765432    54321    0    0    0     0          0         0 12345678    23456    0    0    0     0       0          0
",
        );

        // Block devices
        fs.add_file("/sys/block/sda/size", "1953525168\n");
        fs.add_file("/sys/block/sda/device/model", "Samsung SSD 870\n");
        fs.add_file("/sys/block/sda/device/vendor", "ATA     \n");
        fs.add_file("/sys/block/sda/device/serial", "S6PNNX0R123456\n");
        fs.add_link("/sys/block/sda/device/subsystem", "../../../../../../bus/scsi");
        fs.add_file("/sys/block/loop0/size", "0\n");

        // DRM
        fs.add_file(
            "/sys/class/drm/card0/device/uevent",
            "DRIVER=amdgpu\nPCI_SLOT_NAME=0000:03:00.0\n",
        );
        fs.add_file(
            "/sys/class/drm/card0/device/pp_dpm_sclk",
            "0: 500Mhz \n1: 1800Mhz *\n2: 2100Mhz \n",
        );
        fs.add_dir("/sys/class/drm/renderD128");

        // Interfaces
        fs.add_file("/sys/class/net/eth0/address", "52:54:00:12:34:56\n");

        fs
    }
}
