use crate::core::io::files::InputFile;

pub const SCF_TEMPLATE: &str = "&CONTROL
  calculation = 'scf',
  prefix = 'material',
  outdir = './tmp',
  pseudo_dir = './pseudo',
/
&SYSTEM
  ibrav = 2, celldm(1) = 10.2,
  nat = 1, ntyp = 1,
  ecutwfc = 40.0,
/
&ELECTRONS
  conv_thr = 1.0d-8,
/
ATOMIC_SPECIES
  Si 28.0855 Si.pz-vbc.UPF
ATOMIC_POSITIONS
  Si 0.0 0.0 0.0
K_POINTS automatic
  4 4 4 1 1 1";

pub const RELAX_TEMPLATE: &str = "&CONTROL
  calculation = 'relax',
  prefix = 'material',
  outdir = './tmp',
  pseudo_dir = './pseudo',
/
&SYSTEM
  ibrav = 2, celldm(1) = 10.2,
  nat = 1, ntyp = 1,
  ecutwfc = 40.0,
/
&ELECTRONS
  conv_thr = 1.0d-8,
/
&IONS
  ion_dynamics = 'bfgs',
/
ATOMIC_SPECIES
  Si 28.0855 Si.pz-vbc.UPF
ATOMIC_POSITIONS
  Si 0.0 0.0 0.0
K_POINTS automatic
  4 4 4 1 1 1";

pub const BANDS_TEMPLATE: &str = "&CONTROL
  calculation = 'bands',
  prefix = 'material',
  outdir = './tmp',
  pseudo_dir = './pseudo',
/
&SYSTEM
  ibrav = 2, celldm(1) = 10.2,
  nat = 1, ntyp = 1,
  ecutwfc = 40.0,
/
&ELECTRONS
  conv_thr = 1.0d-8,
/
ATOMIC_SPECIES
  Si 28.0855 Si.pz-vbc.UPF
ATOMIC_POSITIONS
  Si 0.0 0.0 0.0
K_POINTS crystal_b
6
0.0 0.0 0.0  10 ! Γ
0.5 0.0 0.0  10 ! X
0.5 0.5 0.0  10 ! M";

pub const PLOT_TEMPLATE: &str = "import numpy as np
import matplotlib.pyplot as plt

# Load band structure data
data = np.loadtxt('bands.dat.gnu')
k = data[:,0]
E = data[:,1]

# Plot band structure
plt.figure(figsize=(10, 6))
plt.plot(k, E, 'b-', linewidth=1)
plt.xlabel('k-point')
plt.ylabel('Energy (eV)')
plt.axhline(0, color='k', linestyle='--', alpha=0.5)
plt.title('Electronic Band Structure')
plt.grid(True, alpha=0.3)
plt.show()";

/// The file the workflow editor opens first.
pub const DEFAULT_ACTIVE_FILE: &str = "scf.in";

pub fn template_files() -> Vec<InputFile> {
    [
        ("scf.in", SCF_TEMPLATE),
        ("relax.in", RELAX_TEMPLATE),
        ("bands.in", BANDS_TEMPLATE),
        ("plot.py", PLOT_TEMPLATE),
    ]
    .into_iter()
    .map(|(name, content)| InputFile::new(name, content))
    .collect()
}
